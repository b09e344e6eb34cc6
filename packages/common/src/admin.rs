//! Pause switch and timelocked admin transfer.
//!
//! Every contract in the workspace keeps its admin and pause flag inside its
//! own `Config`. [`AdminControl`] pairs that config item with a pending-admin
//! item and runs the shared flow against them:
//! 1. The current admin proposes a successor, which starts the timelock
//! 2. The successor accepts once [`ADMIN_TIMELOCK_DURATION`] has passed
//! 3. The current admin may cancel the proposal at any time before that

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, StdError, StdResult, Storage, Timestamp};
use cw_storage_plus::Item;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Admin timelock duration (7 days)
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

#[cw_serde]
pub struct PendingAdmin {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

/// A config that carries an admin and a pause flag.
pub trait Administered: Serialize + DeserializeOwned {
    fn admin(&self) -> &Addr;
    fn set_admin(&mut self, admin: Addr);
    fn set_paused(&mut self, paused: bool);
}

#[derive(Error, Debug, PartialEq)]
pub enum AdminError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },
}

pub struct AdminControl<'a, C> {
    config: Item<'a, C>,
    pending: Item<'a, PendingAdmin>,
}

impl<'a, C> AdminControl<'a, C> {
    pub const fn new(config: Item<'a, C>, pending: Item<'a, PendingAdmin>) -> Self {
        Self { config, pending }
    }
}

impl<'a, C: Administered> AdminControl<'a, C> {
    fn load_as_admin(&self, storage: &dyn Storage, sender: &Addr) -> Result<C, AdminError> {
        let config = self.config.load(storage)?;
        if sender != config.admin() {
            return Err(AdminError::Unauthorized);
        }
        Ok(config)
    }

    pub fn set_paused(
        &self,
        deps: DepsMut,
        info: MessageInfo,
        paused: bool,
    ) -> Result<Response, AdminError> {
        let mut config = self.load_as_admin(deps.storage, &info.sender)?;
        config.set_paused(paused);
        self.config.save(deps.storage, &config)?;

        let method = if paused { "pause" } else { "unpause" };
        Ok(Response::new().add_attribute("method", method))
    }

    /// Propose a new admin (starts timelock).
    pub fn propose(
        &self,
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        new_admin: String,
    ) -> Result<Response, AdminError> {
        self.load_as_admin(deps.storage, &info.sender)?;

        let pending = PendingAdmin {
            new_address: deps.api.addr_validate(&new_admin)?,
            execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
        };
        self.pending.save(deps.storage, &pending)?;

        Ok(Response::new()
            .add_attribute("method", "propose_admin")
            .add_attribute("new_admin", pending.new_address)
            .add_attribute("execute_after", pending.execute_after.seconds().to_string()))
    }

    pub fn accept(
        &self,
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, AdminError> {
        let pending = self
            .pending
            .may_load(deps.storage)?
            .ok_or(AdminError::NoPendingAdmin)?;
        if info.sender != pending.new_address {
            return Err(AdminError::UnauthorizedPendingAdmin);
        }
        if env.block.time < pending.execute_after {
            return Err(AdminError::TimelockNotExpired {
                remaining_seconds: pending.execute_after.seconds() - env.block.time.seconds(),
            });
        }

        let mut config = self.config.load(deps.storage)?;
        config.set_admin(pending.new_address.clone());
        self.config.save(deps.storage, &config)?;
        self.pending.remove(deps.storage);

        Ok(Response::new()
            .add_attribute("method", "accept_admin")
            .add_attribute("new_admin", pending.new_address))
    }

    pub fn cancel(&self, deps: DepsMut, info: MessageInfo) -> Result<Response, AdminError> {
        self.load_as_admin(deps.storage, &info.sender)?;
        self.pending.remove(deps.storage);

        Ok(Response::new().add_attribute("method", "cancel_admin_proposal"))
    }

    pub fn pending(&self, storage: &dyn Storage) -> StdResult<Option<PendingAdmin>> {
        self.pending.may_load(storage)
    }
}
