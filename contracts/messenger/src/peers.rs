//! Peer registry.
//!
//! A peer is the trusted messenger of a remote chain, stored as a 32-byte
//! address. Setting a peer and enabling its chain are separate steps, so an
//! address can be staged before the chain becomes a send target. Trust on the
//! inbound path depends only on the address, not on the enabled flag.

use cosmwasm_std::{Addr, Binary, Order, StdResult, Storage};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::state::{PeerChange, PeerConfig, PEERS, PEER_HISTORY};

/// Replace the peer of `eid` and append an audit entry.
pub fn set_peer(
    storage: &mut dyn Storage,
    eid: u32,
    peer: &Binary,
    changed_by: &Addr,
    height: u64,
) -> Result<PeerConfig, ContractError> {
    let peer = validate_peer(peer)?;

    let mut config = PEERS.may_load(storage, eid)?.unwrap_or_default();
    let change = PeerChange {
        previous: config.peer,
        peer,
        changed_by: changed_by.clone(),
        height,
    };

    config.peer = Some(peer);
    config.version += 1;
    PEERS.save(storage, eid, &config)?;
    PEER_HISTORY.save(storage, (eid, config.version), &change)?;

    Ok(config)
}

fn validate_peer(peer: &Binary) -> Result<[u8; 32], ContractError> {
    let bytes: [u8; 32] = peer
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidPeer {
            reason: format!("expected 32 bytes, got {}", peer.len()),
        })?;
    if bytes == [0u8; 32] {
        return Err(ContractError::InvalidPeer {
            reason: "zero address".to_string(),
        });
    }
    Ok(bytes)
}

pub fn set_chain_enabled(
    storage: &mut dyn Storage,
    eid: u32,
    enabled: bool,
) -> Result<PeerConfig, ContractError> {
    let mut config = PEERS.may_load(storage, eid)?.unwrap_or_default();
    config.enabled = enabled;
    PEERS.save(storage, eid, &config)?;
    Ok(config)
}

/// Peer address for a send to `eid`. `PeerNotSet` takes precedence over
/// `PeerChainNotEnabled`.
pub fn send_target(storage: &dyn Storage, eid: u32) -> Result<[u8; 32], ContractError> {
    let config = PEERS.may_load(storage, eid)?.unwrap_or_default();
    let peer = config.peer.ok_or(ContractError::PeerNotSet { eid })?;
    if !config.enabled {
        return Err(ContractError::PeerChainNotEnabled { eid });
    }
    Ok(peer)
}

pub fn is_trusted_sender(storage: &dyn Storage, eid: u32, sender: &[u8]) -> StdResult<bool> {
    Ok(PEERS
        .may_load(storage, eid)?
        .and_then(|config| config.peer)
        .map(|peer| peer.as_slice() == sender)
        .unwrap_or(false))
}

/// Enabled chains in ascending eid order.
pub fn enabled_peer_chains(storage: &dyn Storage) -> StdResult<Vec<u32>> {
    PEERS
        .range(storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((eid, config)) if config.enabled => Some(Ok(eid)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

pub fn peer_history(
    storage: &dyn Storage,
    eid: u32,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, PeerChange)>> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);
    PEER_HISTORY
        .prefix(eid)
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn peer(byte: u8) -> Binary {
        Binary::from(vec![byte; 32])
    }

    #[test]
    fn test_set_peer_is_last_write_wins_and_audited() {
        let mut storage = MockStorage::new();
        let admin = Addr::unchecked("admin");

        set_peer(&mut storage, 2, &peer(1), &admin, 10).unwrap();
        let config = set_peer(&mut storage, 2, &peer(2), &admin, 11).unwrap();

        assert_eq!(config.peer, Some([2u8; 32]));
        assert_eq!(config.version, 2);

        let history = peer_history(&storage, 2, None, None).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].1.previous, Some([1u8; 32]));
        assert_eq!(history[1].1.height, 11);
    }

    #[test]
    fn test_set_peer_rejects_bad_input() {
        let mut storage = MockStorage::new();
        let admin = Addr::unchecked("admin");

        let err = set_peer(&mut storage, 2, &Binary::from(vec![1u8; 20]), &admin, 1).unwrap_err();
        assert!(matches!(err, ContractError::InvalidPeer { .. }));

        let err = set_peer(&mut storage, 2, &peer(0), &admin, 1).unwrap_err();
        assert!(matches!(err, ContractError::InvalidPeer { .. }));
    }

    #[test]
    fn test_send_target_checks_peer_before_enabled() {
        let mut storage = MockStorage::new();
        let admin = Addr::unchecked("admin");

        set_chain_enabled(&mut storage, 2, true).unwrap();
        assert_eq!(
            send_target(&storage, 2).unwrap_err(),
            ContractError::PeerNotSet { eid: 2 }
        );

        set_chain_enabled(&mut storage, 3, false).unwrap();
        set_peer(&mut storage, 3, &peer(3), &admin, 1).unwrap();
        assert_eq!(
            send_target(&storage, 3).unwrap_err(),
            ContractError::PeerChainNotEnabled { eid: 3 }
        );

        set_peer(&mut storage, 2, &peer(2), &admin, 1).unwrap();
        assert_eq!(send_target(&storage, 2).unwrap(), [2u8; 32]);
    }

    #[test]
    fn test_trust_ignores_enabled_flag() {
        let mut storage = MockStorage::new();
        let admin = Addr::unchecked("admin");

        set_peer(&mut storage, 2, &peer(7), &admin, 1).unwrap();
        assert!(is_trusted_sender(&storage, 2, &[7u8; 32]).unwrap());
        assert!(!is_trusted_sender(&storage, 2, &[8u8; 32]).unwrap());
        assert!(!is_trusted_sender(&storage, 3, &[7u8; 32]).unwrap());
    }

    #[test]
    fn test_enabled_peer_chains_lists_only_enabled() {
        let mut storage = MockStorage::new();
        set_chain_enabled(&mut storage, 5, true).unwrap();
        set_chain_enabled(&mut storage, 2, true).unwrap();
        set_chain_enabled(&mut storage, 3, false).unwrap();
        assert_eq!(enabled_peer_chains(&storage).unwrap(), vec![2, 5]);
    }
}
