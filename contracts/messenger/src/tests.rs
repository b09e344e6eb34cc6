//! Handler tests against an in-memory transport.

use common::interface::{LaunchpadHookMsg, OutboundMessage, SendResponse};
use common::{
    address_to_bytes32, compute_guid, MessageType, MessagingFee, MessagingOptions, Origin,
    ProtocolMessage, SaleRef, TradeDirection,
};
use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, BankMsg, Binary, CosmosMsg, Deps, MemoryStorage,
    OwnedDeps, Response, StdResult, SubMsg, Uint128, WasmMsg,
};

use crate::error::ContractError;
use crate::execute::{execute_lz_receive, execute_send, quote_batch};
use crate::msg::OptionsEntry;
use crate::peers;
use crate::state::{Config, APPLIED, CONFIG, CREATE_TOKEN_GAS, INBOUND_BUDGETS};
use crate::transport::{MessageTransport, OutboundPacket};

const LOCAL_EID: u32 = 1;
const REMOTE_EID: u32 = 2;
const BASE_FEE: u128 = 1_000;

struct FakeTransport {
    endpoint: Addr,
}

impl MessageTransport for FakeTransport {
    fn connect(config: &Config) -> Self {
        FakeTransport {
            endpoint: config.endpoint.clone(),
        }
    }

    fn quote(
        &self,
        _deps: Deps,
        _dst_eid: u32,
        message: &[u8],
        options: &MessagingOptions,
    ) -> StdResult<MessagingFee> {
        Ok(MessagingFee {
            native_fee: Uint128::new(BASE_FEE + message.len() as u128 + options.gas as u128)
                + options.value,
        })
    }

    fn outbound_nonce(
        &self,
        _deps: Deps,
        _sender: &Addr,
        _dst_eid: u32,
        _receiver: &[u8; 32],
    ) -> StdResult<u64> {
        Ok(41)
    }

    fn send(&self, packet: OutboundPacket, fee: Uint128, _refund: &Addr) -> StdResult<CosmosMsg> {
        Ok(BankMsg::Send {
            to_address: format!("transport-{}", packet.dst_eid),
            amount: coins(fee.u128(), "uluna"),
        }
        .into())
    }

    fn is_endpoint(&self, caller: &Addr) -> bool {
        *caller == self.endpoint
    }
}

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

fn transport(deps: &TestDeps) -> FakeTransport {
    FakeTransport::connect(&CONFIG.load(&deps.storage).unwrap())
}

fn remote_peer() -> [u8; 32] {
    [7u8; 32]
}

fn setup() -> TestDeps {
    let mut deps = mock_dependencies();
    CONFIG
        .save(
            deps.as_mut().storage,
            &Config {
                admin: Addr::unchecked("admin"),
                paused: false,
                endpoint: Addr::unchecked("endpoint"),
                eid: LOCAL_EID,
                launchpad: Some(Addr::unchecked("launchpad")),
                native_denom: "uluna".to_string(),
            },
        )
        .unwrap();
    let admin = Addr::unchecked("admin");
    peers::set_peer(
        deps.as_mut().storage,
        REMOTE_EID,
        &Binary::from(remote_peer().to_vec()),
        &admin,
        1,
    )
    .unwrap();
    peers::set_chain_enabled(deps.as_mut().storage, REMOTE_EID, true).unwrap();
    deps
}

fn create_token(index: u64) -> ProtocolMessage {
    ProtocolMessage::CreateToken {
        sale: SaleRef {
            origin_eid: LOCAL_EID,
            index,
        },
        name: "Test Token".to_string(),
        symbol: "TEST".to_string(),
        metadata_uri: "ipfs://test".to_string(),
        creator: "user".to_string(),
    }
}

fn outbound(dst_eid: u32, message: ProtocolMessage) -> OutboundMessage {
    OutboundMessage {
        dst_eid,
        message,
        options: MessagingOptions::default(),
    }
}

fn create_fee(index: u64) -> u128 {
    BASE_FEE + create_token(index).encode().unwrap().len() as u128 + CREATE_TOKEN_GAS as u128
}

// ============================================================================
// Send
// ============================================================================

#[test]
fn test_send_only_from_launchpad() {
    let mut deps = setup();
    let err = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("user", &coins(1_000_000, "uluna")),
        vec![outbound(REMOTE_EID, create_token(0))],
        "user".to_string(),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OnlyLaunchpad);
}

#[test]
fn test_send_fails_whole_batch_on_missing_peer() {
    let mut deps = setup();
    let err = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("launchpad", &coins(1_000_000, "uluna")),
        vec![
            outbound(REMOTE_EID, create_token(0)),
            outbound(3, create_token(0)),
        ],
        "user".to_string(),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::PeerNotSet { eid: 3 });
}

#[test]
fn test_send_rejects_disabled_chain() {
    let mut deps = setup();
    peers::set_chain_enabled(deps.as_mut().storage, REMOTE_EID, false).unwrap();
    let err = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("launchpad", &coins(1_000_000, "uluna")),
        vec![outbound(REMOTE_EID, create_token(0))],
        "user".to_string(),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::PeerChainNotEnabled { eid: REMOTE_EID });
}

#[test]
fn test_quote_then_send_exact_and_short() {
    let mut deps = setup();
    let batch = vec![outbound(REMOTE_EID, create_token(0))];
    let quoted = quote_batch(deps.as_ref(), &transport(&deps), &batch)
        .unwrap()
        .native_fee;
    assert_eq!(quoted, Uint128::new(create_fee(0)));

    let err = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("launchpad", &coins(quoted.u128() - 1, "uluna")),
        batch.clone(),
        "user".to_string(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientFee {
            required: quoted,
            provided: quoted - Uint128::one(),
        }
    );

    let res = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("launchpad", &coins(quoted.u128(), "uluna")),
        batch,
        "user".to_string(),
    )
    .unwrap();
    // One transport message, no refund
    assert_eq!(res.messages.len(), 1);
}

#[test]
fn test_send_refunds_excess_and_returns_receipts() {
    let mut deps = setup();
    let fee = create_fee(0) + create_fee(1);
    let res = execute_send::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("launchpad", &coins(fee + 500, "uluna")),
        vec![
            outbound(REMOTE_EID, create_token(0)),
            outbound(REMOTE_EID, create_token(1)),
        ],
        "user".to_string(),
    )
    .unwrap();

    assert_eq!(res.messages.len(), 3);
    assert_eq!(
        res.messages[2],
        SubMsg::new(BankMsg::Send {
            to_address: "user".to_string(),
            amount: coins(500, "uluna"),
        })
    );

    let data: SendResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.receipts.len(), 2);
    assert_eq!(data.receipts[0].nonce, 42);
    assert_eq!(data.receipts[1].nonce, 43);

    let sender = address_to_bytes32(mock_env().contract.address.as_str());
    let expected = compute_guid(42, LOCAL_EID, &sender, REMOTE_EID, &remote_peer());
    assert_eq!(data.receipts[0].guid, Binary::from(expected.to_vec()));
    assert_ne!(data.receipts[0].guid, data.receipts[1].guid);
}

#[test]
fn test_enforced_options_raise_the_quote() {
    let mut deps = setup();
    let info = mock_info("admin", &[]);
    crate::execute::execute_set_enforced_options(
        deps.as_mut(),
        info,
        vec![OptionsEntry {
            eid: REMOTE_EID,
            msg_type: MessageType::CreateToken,
            options: MessagingOptions::new(CREATE_TOKEN_GAS + 100_000, 0),
        }],
    )
    .unwrap();

    let fee = quote_batch(
        deps.as_ref(),
        &transport(&deps),
        &[outbound(REMOTE_EID, create_token(0))],
    )
    .unwrap();
    assert_eq!(fee.native_fee, Uint128::new(create_fee(0) + 100_000));
}

// ============================================================================
// Receive
// ============================================================================

fn origin(nonce: u64) -> Origin {
    Origin {
        src_eid: REMOTE_EID,
        sender: Binary::from(remote_peer().to_vec()),
        nonce,
    }
}

fn guid_for(nonce: u64) -> Binary {
    let receiver = address_to_bytes32(mock_env().contract.address.as_str());
    Binary::from(compute_guid(nonce, REMOTE_EID, &remote_peer(), LOCAL_EID, &receiver).to_vec())
}

fn bridge_tokens() -> ProtocolMessage {
    ProtocolMessage::BridgeTokens {
        sale: SaleRef {
            origin_eid: REMOTE_EID,
            index: 0,
        },
        direction: TradeDirection::Buy,
        amount: Uint128::new(10_000_000_000),
        funds: Uint128::new(1_000_000),
    }
}

fn receive(
    deps: &mut TestDeps,
    caller: &str,
    origin: Origin,
    guid: Binary,
    message: Vec<u8>,
) -> Result<Response, ContractError> {
    execute_lz_receive::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info(caller, &[]),
        origin,
        guid,
        Binary::from(message),
    )
}

#[test]
fn test_receive_only_from_endpoint() {
    let mut deps = setup();
    let payload = bridge_tokens().encode().unwrap();
    let err = receive(&mut deps, "stranger", origin(1), guid_for(1), payload).unwrap_err();
    assert_eq!(err, ContractError::OnlyEndpoint);
}

#[test]
fn test_receive_follows_the_configured_endpoint() {
    let mut deps = setup();
    CONFIG
        .update(deps.as_mut().storage, |mut config| -> StdResult<_> {
            config.endpoint = Addr::unchecked("endpoint-v2");
            Ok(config)
        })
        .unwrap();

    let payload = bridge_tokens().encode().unwrap();
    let err = receive(&mut deps, "endpoint", origin(1), guid_for(1), payload.clone()).unwrap_err();
    assert_eq!(err, ContractError::OnlyEndpoint);

    let res = receive(&mut deps, "endpoint-v2", origin(1), guid_for(1), payload).unwrap();
    assert_eq!(res.messages.len(), 1);
}

#[test]
fn test_receive_rejects_untrusted_sender() {
    let mut deps = setup();
    let payload = bridge_tokens().encode().unwrap();
    let spoofed = Origin {
        sender: Binary::from(vec![9u8; 32]),
        ..origin(1)
    };
    let err = receive(&mut deps, "endpoint", spoofed, guid_for(1), payload).unwrap_err();
    assert!(matches!(
        err,
        ContractError::UntrustedSender {
            src_eid: REMOTE_EID,
            ..
        }
    ));
}

#[test]
fn test_receive_dispatches_with_inbound_gas_budget() {
    let mut deps = setup();
    let payload = bridge_tokens().encode().unwrap();
    let res = receive(&mut deps, "endpoint", origin(1), guid_for(1), payload).unwrap();

    assert_eq!(res.messages.len(), 1);
    assert_eq!(res.messages[0].gas_limit, Some(200_000));
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => {
            assert_eq!(contract_addr, "launchpad");
            assert_eq!(
                *msg,
                to_json_binary(&LaunchpadHookMsg::ApplyRemote {
                    src_eid: REMOTE_EID,
                    guid: guid_for(1),
                    message: bridge_tokens(),
                })
                .unwrap()
            );
        }
        other => panic!("unexpected message: {:?}", other),
    }
    assert!(APPLIED.has(deps.as_ref().storage, guid_for(1).as_slice()));
}

#[test]
fn test_create_token_gets_room_for_token_instantiation() {
    let mut deps = setup();
    let payload = create_token(0).encode().unwrap();
    let res = receive(&mut deps, "endpoint", origin(1), guid_for(1), payload).unwrap();
    assert_eq!(res.messages[0].gas_limit, Some(CREATE_TOKEN_GAS));
    assert!(CREATE_TOKEN_GAS > crate::state::default_options(MessageType::BridgeTokens).gas);
}

#[test]
fn test_replayed_guid_is_noop() {
    let mut deps = setup();
    let payload = bridge_tokens().encode().unwrap();
    receive(&mut deps, "endpoint", origin(1), guid_for(1), payload.clone()).unwrap();

    let res = receive(&mut deps, "endpoint", origin(1), guid_for(1), payload).unwrap();
    assert!(res.messages.is_empty());
    assert!(res
        .attributes
        .iter()
        .any(|a| a.key == "status" && a.value == "duplicate"));
}

#[test]
fn test_receive_rejects_mismatched_guid() {
    let mut deps = setup();
    let payload = bridge_tokens().encode().unwrap();
    let err = receive(&mut deps, "endpoint", origin(1), guid_for(2), payload).unwrap_err();
    assert_eq!(err, ContractError::GuidMismatch);
}

#[test]
fn test_receive_rejects_malformed_payload() {
    let mut deps = setup();
    let mut payload = bridge_tokens().encode().unwrap();
    payload.truncate(20);
    let err = receive(&mut deps, "endpoint", origin(1), guid_for(1), payload).unwrap_err();
    assert!(matches!(err, ContractError::InvalidMessage { .. }));
    assert!(!APPLIED.has(deps.as_ref().storage, guid_for(1).as_slice()));
}

#[test]
fn test_receive_enforces_value_budget() {
    let mut deps = setup();
    INBOUND_BUDGETS
        .save(
            deps.as_mut().storage,
            (REMOTE_EID, MessageType::BridgeTokens.as_u8()),
            &MessagingOptions::new(150_000, 10),
        )
        .unwrap();

    let err = execute_lz_receive::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("endpoint", &coins(11, "uluna")),
        origin(1),
        guid_for(1),
        Binary::from(bridge_tokens().encode().unwrap()),
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::BudgetExceeded { .. }));

    let res = execute_lz_receive::<FakeTransport>(
        deps.as_mut(),
        mock_env(),
        mock_info("endpoint", &coins(10, "uluna")),
        origin(1),
        guid_for(1),
        Binary::from(bridge_tokens().encode().unwrap()),
    )
    .unwrap();
    assert_eq!(res.messages[0].gas_limit, Some(150_000));
}
