//! Byte-rolling CFB batch ciphers with SHA-256 integrity checksums.
//!
//! The wire discipline processes one byte at a time: a fresh CFB keystream
//! byte is produced by encrypting the current IV register, the byte is XORed
//! with it, then the register shifts left by one byte and the *ciphertext*
//! byte is appended. Both directions roll their register with the ciphertext,
//! so sender and receiver stay in lockstep for the whole connection. The IV
//! register is mutable stream state; a cipher instance must never be shared
//! between batches of different sessions.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use bytes::{BufMut, Bytes, BytesMut};
use sha2::{Digest, Sha256};

use crate::CryptoError;

/// Number of checksum bytes appended to every plaintext body.
pub const CHECKSUM_LEN: usize = 8;

/// One byte of CFB keystream for the current register state.
fn keystream_byte(cipher: &Aes256, register: &[u8; 16]) -> u8 {
    let mut block = GenericArray::clone_from_slice(register);
    cipher.encrypt_block(&mut block);
    block[0]
}

/// Shift the register left one byte and append the consumed ciphertext byte.
fn roll(register: &mut [u8; 16], ciphertext_byte: u8) {
    register.copy_within(1.., 0);
    register[15] = ciphertext_byte;
}

fn checksum(counter: u64, body: &[u8], secret: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(counter.to_le_bytes());
    hasher.update(body);
    hasher.update(secret);
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Outbound half of the session cipher.
pub struct BatchEncryptor {
    cipher: Aes256,
    register: [u8; 16],
    secret: [u8; 32],
    send_counter: u64,
}

impl BatchEncryptor {
    pub fn new(secret: &[u8; 32], iv: &[u8; 16]) -> Self {
        Self {
            cipher: Aes256::new(secret.into()),
            register: *iv,
            secret: *secret,
            send_counter: 0,
        }
    }

    /// Append the send checksum to `body` and encrypt the whole buffer.
    pub fn encrypt(&mut self, body: &[u8]) -> Bytes {
        let sum = checksum(self.send_counter, body, &self.secret);
        self.send_counter += 1;

        let mut data = BytesMut::with_capacity(body.len() + CHECKSUM_LEN);
        data.put_slice(body);
        data.put_slice(&sum);

        for byte in data.iter_mut() {
            let encrypted = *byte ^ keystream_byte(&self.cipher, &self.register);
            roll(&mut self.register, encrypted);
            *byte = encrypted;
        }

        data.freeze()
    }
}

/// Inbound half of the session cipher.
#[derive(Debug)]
pub struct BatchDecryptor {
    cipher: Aes256,
    register: [u8; 16],
    secret: [u8; 32],
    recv_counter: u64,
}

impl BatchDecryptor {
    pub fn new(secret: &[u8; 32], iv: &[u8; 16]) -> Self {
        Self {
            cipher: Aes256::new(secret.into()),
            register: *iv,
            secret: *secret,
            recv_counter: 0,
        }
    }

    /// Decrypt a batch body and verify its trailing checksum.
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Bytes, CryptoError> {
        if data.len() < CHECKSUM_LEN {
            return Err(CryptoError::ChecksumMismatch);
        }

        let mut plain = data.to_vec();
        for byte in plain.iter_mut() {
            let encrypted = *byte;
            *byte = encrypted ^ keystream_byte(&self.cipher, &self.register);
            roll(&mut self.register, encrypted);
        }

        let body_len = plain.len() - CHECKSUM_LEN;
        let expected = checksum(self.recv_counter, &plain[..body_len], &self.secret);
        self.recv_counter += 1;

        if plain[body_len..] != expected {
            return Err(CryptoError::ChecksumMismatch);
        }

        plain.truncate(body_len);
        Ok(Bytes::from(plain))
    }
}
