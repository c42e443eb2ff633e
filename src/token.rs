use crate::census::Address;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Where voting weight comes from. Read once, when a voter registers.
pub trait BalanceSource {
    fn balance_of(&self, address: &Address) -> u64;
}

/// A minimal fungible token ledger, enough to fund voters.
#[derive(Clone, Debug, Default)]
pub struct TokenLedger {
    balances: HashMap<Address, u64>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, to: Address, amount: u64) -> Result<()> {
        let balance = self.balances.entry(to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(Error::BalanceOverflow)?;
        Ok(())
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: u64) -> Result<()> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(Error::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        self.mint(to, amount)?;
        self.balances.insert(from, available - amount);
        Ok(())
    }
}

impl BalanceSource for TokenLedger {
    fn balance_of(&self, address: &Address) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }
}
