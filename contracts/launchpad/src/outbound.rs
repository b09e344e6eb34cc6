//! Outbound protocol messages.
//!
//! Every send goes through the cross-chain messenger with exactly the quoted
//! fee attached. Whatever the caller attached on top is refunded here, so the
//! messenger never holds launchpad funds.

use common::interface::{
    messenger_send_msg, MessengerQueryMsg, OutboundMessage, PeerChainsResponse,
};
use common::{MessagingFee, MessagingOptions, ProtocolMessage, SaleRef};
use cosmwasm_std::{coins, Addr, BankMsg, CosmosMsg, Deps, MessageInfo, StdResult, Uint128};

use crate::error::ContractError;
use crate::state::{Config, Sale};

/// Native funds attached in `denom`.
pub fn paid_amount(info: &MessageInfo, denom: &str) -> Uint128 {
    info.funds
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum()
}

pub fn messenger(config: &Config) -> Result<&Addr, ContractError> {
    config.messenger.as_ref().ok_or(ContractError::MessengerNotSet)
}

/// Chains the messenger currently sends to. Empty without a messenger.
pub fn peer_chains(deps: Deps, config: &Config) -> StdResult<Vec<u32>> {
    match &config.messenger {
        Some(messenger) => {
            let res: PeerChainsResponse = deps
                .querier
                .query_wasm_smart(messenger, &MessengerQueryMsg::PeerChains {})?;
            Ok(res.eids)
        }
        None => Ok(vec![]),
    }
}

/// Summed messaging fee of a batch; zero for an empty batch.
pub fn quote(
    deps: Deps,
    config: &Config,
    messages: &[OutboundMessage],
) -> Result<Uint128, ContractError> {
    if messages.is_empty() {
        return Ok(Uint128::zero());
    }
    let fee: MessagingFee = deps.querier.query_wasm_smart(
        messenger(config)?,
        &MessengerQueryMsg::QuoteBatch {
            messages: messages.to_vec(),
        },
    )?;
    Ok(fee.native_fee)
}

/// The same message to every chain in `dst_eids`.
pub fn fan_out(
    dst_eids: &[u32],
    message: &ProtocolMessage,
    options: Option<MessagingOptions>,
) -> Vec<OutboundMessage> {
    dst_eids
        .iter()
        .map(|dst_eid| OutboundMessage {
            dst_eid: *dst_eid,
            message: message.clone(),
            options: options.unwrap_or_default(),
        })
        .collect()
}

pub fn create_token_message(sale: &Sale, sale_ref: SaleRef) -> ProtocolMessage {
    ProtocolMessage::CreateToken {
        sale: sale_ref,
        name: sale.name.clone(),
        symbol: sale.symbol.clone(),
        metadata_uri: sale.metadata_uri.clone(),
        creator: sale.creator.clone(),
    }
}

/// Outcome of [`dispatch`].
pub struct Dispatch {
    pub msgs: Vec<CosmosMsg>,
    pub fee: Uint128,
    pub refund: Uint128,
}

/// Pay for and send `messages` out of `available`; the rest goes back to
/// `refund_to`.
pub fn dispatch(
    deps: Deps,
    config: &Config,
    messages: Vec<OutboundMessage>,
    available: Uint128,
    refund_to: &Addr,
) -> Result<Dispatch, ContractError> {
    let fee = quote(deps, config, &messages)?;
    if available < fee {
        return Err(ContractError::InsufficientFee {
            required: fee,
            provided: available,
        });
    }

    let mut msgs = vec![];
    if !messages.is_empty() {
        let funds = if fee.is_zero() {
            vec![]
        } else {
            coins(fee.u128(), &config.native_denom)
        };
        msgs.push(messenger_send_msg(
            messenger(config)?,
            messages,
            refund_to,
            funds,
        )?);
    }

    let refund = available - fee;
    if !refund.is_zero() {
        msgs.push(
            BankMsg::Send {
                to_address: refund_to.to_string(),
                amount: coins(refund.u128(), &config.native_denom),
            }
            .into(),
        );
    }

    Ok(Dispatch { msgs, fee, refund })
}
