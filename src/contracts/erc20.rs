// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! ERC20 bindings for the USDC token
//!
//! Balance, decimals and allowance reads go through
//! [`BlockchainProvider::call`]; `transfer` and `approve` are returned as
//! unsigned [`TransactionRequest`]s for the caller to submit.

use alloy_primitives::{Address, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use tracing::{debug, info};

use super::call_request;
use crate::error::Result;
use crate::traits::BlockchainProvider;

/// ERC20 contract wrapper over any [`BlockchainProvider`].
///
/// ```rust,no_run
/// use alloy_primitives::address;
/// use usdc_cctp::contracts::erc20::Erc20Contract;
/// use usdc_cctp::testing::FakeBlockchainProvider;
///
/// # async fn example() -> usdc_cctp::Result<()> {
/// let provider = FakeBlockchainProvider::new();
/// let usdc = address!("036cbd53842c5426634e7929541ec2318f3dcf7e");
/// let owner = address!("1111111111111111111111111111111111111111");
///
/// let balance = Erc20Contract::new(usdc, &provider).balance_of(owner).await?;
/// # Ok(())
/// # }
/// ```
pub struct Erc20Contract<'a, P: ?Sized> {
    address: Address,
    provider: &'a P,
}

impl<'a, P: BlockchainProvider + ?Sized> Erc20Contract<'a, P> {
    pub fn new(address: Address, provider: &'a P) -> Self {
        debug!(
            contract_address = %address,
            event = "erc20_contract_initialized"
        );
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the token balance of an address
    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        debug!(
            account = %account,
            contract_address = %self.address,
            event = "checking_balance"
        );

        let output = self
            .provider
            .call(call_request(self.address, &Erc20::balanceOfCall { account }))
            .await?;
        let balance = Erc20::balanceOfCall::abi_decode_returns(&output)?;

        info!(
            account = %account,
            balance = %balance,
            contract_address = %self.address,
            event = "balance_retrieved"
        );

        Ok(balance)
    }

    pub async fn decimals(&self) -> Result<u8> {
        let output = self
            .provider
            .call(call_request(self.address, &Erc20::decimalsCall {}))
            .await?;
        Ok(Erc20::decimalsCall::abi_decode_returns(&output)?)
    }

    /// Amount `spender` may still move on behalf of `owner`.
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        debug!(
            owner = %owner,
            spender = %spender,
            contract_address = %self.address,
            event = "checking_allowance"
        );

        let output = self
            .provider
            .call(call_request(
                self.address,
                &Erc20::allowanceCall { owner, spender },
            ))
            .await?;
        let allowance = Erc20::allowanceCall::abi_decode_returns(&output)?;

        info!(
            owner = %owner,
            spender = %spender,
            allowance = %allowance,
            contract_address = %self.address,
            event = "allowance_retrieved"
        );

        Ok(allowance)
    }

    /// Create (but do not send) an `approve(spender, amount)` transaction.
    pub fn approve_transaction(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            spender = %spender,
            amount = %amount,
            contract_address = %self.address,
            event = "approve_transaction_created"
        );

        call_request(self.address, &Erc20::approveCall { spender, amount }).from(from)
    }

    /// Create (but do not send) a `transfer(to, amount)` transaction.
    pub fn transfer_transaction(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            to = %to,
            amount = %amount,
            contract_address = %self.address,
            event = "transfer_transaction_created"
        );

        call_request(self.address, &Erc20::transferCall { to, amount }).from(from)
    }
}

sol!(
    #[allow(missing_docs)]
    contract Erc20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function transfer(address to, uint256 amount) external returns (bool);
    }
);
