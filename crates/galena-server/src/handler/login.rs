//! Login and encryption handshake handlers.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use tracing::{debug, info, warn};

use galena_crypto::{create_handshake_jwt, derive_key, verify_login_chain, CryptoError, ServerKeyPair};
use galena_proto::batch::encode_packet;
use galena_proto::jwt::{self, ClientData};
use galena_proto::packets::{
    id, PlayStatus, PlayStatusType, ResourcePacksInfo, ServerHandshake, Skin, LATEST_PROTOCOL,
};
use galena_proto::registry::GamePacket;
use galena_proto::types::Uuid;

use crate::player::Player;
use crate::session::{Phase, Session};
use crate::session_manager::SessionKeys;
use crate::ServerContext;

fn unix_time() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// `PlayStatus(LoginSuccess)` followed by the pack offer, as one batch.
fn login_success_records(ctx: &ServerContext) -> Vec<Bytes> {
    let packs_info = ResourcePacksInfo {
        must_accept: ctx.config.packs.force_resource_packs && !ctx.packs.is_empty(),
        behavior_packs: Vec::new(),
        resource_packs: ctx.packs.info_entries(),
    };
    vec![
        encode_packet(id::PLAY_STATUS, &PlayStatus::new(PlayStatusType::LoginSuccess)),
        encode_packet(id::RESOURCE_PACKS_INFO, &packs_info),
    ]
}

pub fn handle_login(ctx: &ServerContext, session: &Arc<Session>, packet: GamePacket) -> bool {
    let GamePacket::Login(login) = packet else {
        return false;
    };

    {
        let state = session.state();
        if !matches!(state.phase, Phase::Unconnected | Phase::AwaitingLogin) {
            debug!("unexpected Login from {} in {:?}", session.addr, state.phase);
            return false;
        }
    }

    let identity = match jwt::extract_identity(&login.chain) {
        Ok(identity) => identity,
        Err(e) => {
            debug!("login from {} carries no identity: {e}", session.addr);
            ctx.kick(session, "Authentication failed.", false);
            return true;
        }
    };

    // A name that is already online keeps its session; the newcomer is
    // silently rejected.
    if ctx.sessions.has_name(&identity.display_name) {
        debug!(
            "{} tried to log in twice, rejecting {}",
            identity.display_name, session.addr
        );
        return false;
    }

    if login.protocol_version > LATEST_PROTOCOL {
        info!(
            "{} joined with protocol {} > {LATEST_PROTOCOL}",
            identity.display_name, login.protocol_version
        );
        ctx.kick(session, "Outdated server.", false);
        return true;
    }
    if login.protocol_version < LATEST_PROTOCOL {
        info!(
            "{} joined with protocol {} < {LATEST_PROTOCOL}",
            identity.display_name, login.protocol_version
        );
        ctx.kick(session, "Outdated client.", false);
        return true;
    }

    let verification =
        match verify_login_chain(&login.chain, ctx.config.root_public_key(), unix_time()) {
            Ok(verification) => verification,
            Err(e) => {
                debug!(
                    "{} joined with invalid login data: {e}",
                    identity.display_name
                );
                ctx.kick(session, "Authentication failed.", false);
                return true;
            }
        };

    if verification.authenticated {
        debug!("{} is logged into XBOX Live", identity.display_name);
    } else if ctx.config.auth.xbox_live_auth {
        debug!(
            "{} joined without XBOX Live on an auth-only server",
            identity.display_name
        );
        ctx.kick(session, "XBOX Live account required.", false);
        return true;
    } else {
        debug!("{} is not logged into XBOX Live", identity.display_name);
    }

    let client_data = jwt::extract_client_data(&login.client_data_jwt).unwrap_or_else(|e| {
        debug!("bad client data from {}: {e}", session.addr);
        ClientData::default()
    });

    let uuid = Uuid::parse(&identity.identity).unwrap_or(Uuid::ZERO);
    let runtime_id = ctx.allocate_entity_id();

    {
        let mut state = session.state();
        state.name = identity.display_name.clone();
        state.xuid = identity.xuid.clone();
        state.uuid = uuid;
        state.device_os = client_data.device_os;
        state.protocol = login.protocol_version;
    }
    session.set_player(Player::new(
        uuid,
        identity.xuid.clone(),
        client_data.device_os,
        identity.display_name.clone(),
        Skin::from_client_data(&client_data),
        runtime_id,
        ctx.world.spawn_point(),
    ));

    if ctx.config.auth.use_encryption {
        if let Err(e) = start_encryption(session, &verification) {
            warn!("encryption handshake with {} failed: {e}", session.addr);
            ctx.kick(session, "Encryption handshake failed.", false);
            return true;
        }
        session.state().phase = Phase::AwaitingHandshake;
    } else {
        session.send(login_success_records(ctx));
        session.state().phase = Phase::AwaitingResourcePacks;
    }

    ctx.sessions.add(
        SessionKeys {
            name: identity.display_name.clone(),
            uuid,
            xuid: identity.xuid,
        },
        Arc::clone(session),
    );

    info!(
        "{} logged in from {} (game version {:?}, protocol {})",
        identity.display_name, session.addr, client_data.game_version, login.protocol_version
    );
    true
}

/// Send the signed handshake and arm the ciphers. The handshake itself goes
/// out in the clear; everything after it is encrypted.
fn start_encryption(
    session: &Arc<Session>,
    verification: &galena_crypto::ChainVerification,
) -> Result<(), CryptoError> {
    let keypair = ServerKeyPair::generate();
    let ecdh_secret = keypair.shared_secret(&verification.client_public_key);
    let salt: [u8; 16] = rand::random();
    let (secret, iv) = derive_key(&salt, &ecdh_secret);

    let jwt = create_handshake_jwt(&keypair, &salt)?;
    session.send(vec![encode_packet(
        id::SERVER_HANDSHAKE,
        &ServerHandshake { jwt },
    )]);
    session.enable_encryption(&secret, &iv);
    Ok(())
}

pub fn handle_client_handshake(
    ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::ClientHandshake(_) = packet else {
        return false;
    };

    {
        let state = session.state();
        if state.phase != Phase::AwaitingHandshake {
            debug!(
                "unexpected ClientHandshake from {} in {:?}",
                session.addr, state.phase
            );
            return false;
        }
    }

    // The ciphers were armed when the ServerHandshake went out; this packet
    // arriving intact (it was encrypted) confirms the client agrees.
    info!("encryption confirmed for {}", session.addr);

    session.send(login_success_records(ctx));
    session.state().phase = Phase::AwaitingResourcePacks;
    true
}
