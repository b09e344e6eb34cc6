//! Cross-chain protocol messages and their wire codec.
//!
//! # Wire Format
//!
//! ```text
//! | msg_type (1 byte) | payload (type specific) |
//! ```
//!
//! | Type | Tag | Payload |
//! |------|-----|---------|
//! | CREATE_TOKEN      | 1 | sale_ref (12) · name · symbol · metadata_uri · creator |
//! | BRIDGE_TOKENS     | 2 | sale_ref (12) · direction (1) · amount (16) · funds (16) |
//! | LIQUIDITY_CREATED | 3 | sale_ref (12) |
//!
//! `sale_ref` is `origin_eid (u32) · index (u64)`. Integers are big-endian;
//! strings are a `u16` big-endian byte length followed by UTF-8 bytes.
//! Tags are fixed for the lifetime of the protocol: both chains' enforced
//! options are keyed by them.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Uint128};

/// Upper bound on an encoded message, matching the executor `maxMessageSize`.
pub const MAX_MESSAGE_SIZE: usize = 10_000;

/// Message type tags
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum MessageType {
    CreateToken,
    BridgeTokens,
    LiquidityCreated,
}

impl MessageType {
    pub const ALL: [MessageType; 3] = [
        MessageType::CreateToken,
        MessageType::BridgeTokens,
        MessageType::LiquidityCreated,
    ];

    pub const fn as_u8(self) -> u8 {
        match self {
            MessageType::CreateToken => 1,
            MessageType::BridgeTokens => 2,
            MessageType::LiquidityCreated => 3,
        }
    }

    pub fn from_u8(tag: u8) -> StdResult<Self> {
        match tag {
            1 => Ok(MessageType::CreateToken),
            2 => Ok(MessageType::BridgeTokens),
            3 => Ok(MessageType::LiquidityCreated),
            other => Err(StdError::generic_err(format!(
                "Unknown message type: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::CreateToken => "create_token",
            MessageType::BridgeTokens => "bridge_tokens",
            MessageType::LiquidityCreated => "liquidity_created",
        }
    }
}

/// Cross-chain identity of a sale: the chain it was created on and its index there.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub struct SaleRef {
    pub origin_eid: u32,
    pub index: u64,
}

/// Direction of a trade delta carried by BRIDGE_TOKENS.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TradeDirection {
    /// Tokens left the curve, native currency came in
    Buy,
    /// Tokens returned to the curve, native currency went out
    Sell,
}

impl TradeDirection {
    const fn as_u8(self) -> u8 {
        match self {
            TradeDirection::Buy => 1,
            TradeDirection::Sell => 2,
        }
    }

    fn from_u8(tag: u8) -> StdResult<Self> {
        match tag {
            1 => Ok(TradeDirection::Buy),
            2 => Ok(TradeDirection::Sell),
            other => Err(StdError::generic_err(format!(
                "Unknown trade direction: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }
}

#[cw_serde]
pub enum ProtocolMessage {
    /// Register a mirrored sale on the destination chain
    CreateToken {
        sale: SaleRef,
        name: String,
        symbol: String,
        metadata_uri: String,
        /// Resolved creator: the override when one was given, else the caller
        creator: String,
    },
    /// Additive trade delta for a mirrored sale
    BridgeTokens {
        sale: SaleRef,
        direction: TradeDirection,
        /// Token base units moved
        amount: Uint128,
        /// Native base units moved
        funds: Uint128,
    },
    /// The sale graduated on its origin chain
    LiquidityCreated { sale: SaleRef },
}

impl ProtocolMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            ProtocolMessage::CreateToken { .. } => MessageType::CreateToken,
            ProtocolMessage::BridgeTokens { .. } => MessageType::BridgeTokens,
            ProtocolMessage::LiquidityCreated { .. } => MessageType::LiquidityCreated,
        }
    }

    pub fn sale(&self) -> SaleRef {
        match self {
            ProtocolMessage::CreateToken { sale, .. }
            | ProtocolMessage::BridgeTokens { sale, .. }
            | ProtocolMessage::LiquidityCreated { sale } => *sale,
        }
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> StdResult<Vec<u8>> {
        let mut out = Vec::with_capacity(64);
        out.push(self.message_type().as_u8());
        write_sale_ref(&mut out, &self.sale());

        match self {
            ProtocolMessage::CreateToken {
                name,
                symbol,
                metadata_uri,
                creator,
                ..
            } => {
                write_string(&mut out, name)?;
                write_string(&mut out, symbol)?;
                write_string(&mut out, metadata_uri)?;
                write_string(&mut out, creator)?;
            }
            ProtocolMessage::BridgeTokens {
                direction,
                amount,
                funds,
                ..
            } => {
                out.push(direction.as_u8());
                out.extend_from_slice(&amount.u128().to_be_bytes());
                out.extend_from_slice(&funds.u128().to_be_bytes());
            }
            ProtocolMessage::LiquidityCreated { .. } => {}
        }

        if out.len() > MAX_MESSAGE_SIZE {
            return Err(StdError::generic_err(format!(
                "Message too large: {} bytes (max {})",
                out.len(),
                MAX_MESSAGE_SIZE
            )));
        }
        Ok(out)
    }

    /// Decode wire bytes. Rejects oversize input, unknown tags and trailing bytes.
    pub fn decode(bytes: &[u8]) -> StdResult<Self> {
        if bytes.len() > MAX_MESSAGE_SIZE {
            return Err(StdError::generic_err(format!(
                "Message too large: {} bytes (max {})",
                bytes.len(),
                MAX_MESSAGE_SIZE
            )));
        }

        let mut reader = Reader::new(bytes);
        let msg_type = MessageType::from_u8(reader.read_u8()?)?;
        let sale = SaleRef {
            origin_eid: reader.read_u32()?,
            index: reader.read_u64()?,
        };

        let msg = match msg_type {
            MessageType::CreateToken => ProtocolMessage::CreateToken {
                sale,
                name: reader.read_string()?,
                symbol: reader.read_string()?,
                metadata_uri: reader.read_string()?,
                creator: reader.read_string()?,
            },
            MessageType::BridgeTokens => ProtocolMessage::BridgeTokens {
                sale,
                direction: TradeDirection::from_u8(reader.read_u8()?)?,
                amount: Uint128::new(reader.read_u128()?),
                funds: Uint128::new(reader.read_u128()?),
            },
            MessageType::LiquidityCreated => ProtocolMessage::LiquidityCreated { sale },
        };

        reader.finish()?;
        Ok(msg)
    }
}

/// Read only the type tag of an encoded message.
pub fn peek_message_type(bytes: &[u8]) -> StdResult<MessageType> {
    let tag = bytes
        .first()
        .ok_or_else(|| StdError::generic_err("Empty message"))?;
    MessageType::from_u8(*tag)
}

// ============================================================================
// Internal helpers
// ============================================================================

fn write_sale_ref(out: &mut Vec<u8>, sale: &SaleRef) {
    out.extend_from_slice(&sale.origin_eid.to_be_bytes());
    out.extend_from_slice(&sale.index.to_be_bytes());
}

fn write_string(out: &mut Vec<u8>, value: &str) -> StdResult<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        StdError::generic_err(format!("String field too long: {} bytes", value.len()))
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> StdResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                StdError::generic_err(format!(
                    "Truncated message: need {} bytes at offset {}, have {}",
                    len,
                    self.pos,
                    self.buf.len()
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> StdResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> StdResult<u16> {
        let mut b = [0u8; 2];
        b.copy_from_slice(self.take(2)?);
        Ok(u16::from_be_bytes(b))
    }

    fn read_u32(&mut self) -> StdResult<u32> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(b))
    }

    fn read_u64(&mut self) -> StdResult<u64> {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(b))
    }

    fn read_u128(&mut self) -> StdResult<u128> {
        let mut b = [0u8; 16];
        b.copy_from_slice(self.take(16)?);
        Ok(u128::from_be_bytes(b))
    }

    fn read_string(&mut self) -> StdResult<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| StdError::generic_err(format!("Invalid UTF-8 in string field: {}", e)))
    }

    fn finish(&self) -> StdResult<()> {
        if self.pos != self.buf.len() {
            return Err(StdError::generic_err(format!(
                "Trailing bytes in message: {} unread",
                self.buf.len() - self.pos
            )));
        }
        Ok(())
    }
}
