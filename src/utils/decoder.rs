//! Selector decoder module
//! Recognizes well-known method selectors and decodes approval calldata

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

// ERC-20 / ERC-721 / Safe function signatures
sol! {
    function approve(address spender, uint256 amount) external returns (bool);

    function transfer(address to, uint256 amount) external returns (bool);

    function safeTransferFrom(address from, address to, uint256 tokenId) external;

    function safeTransferFrom(
        address from,
        address to,
        uint256 tokenId,
        bytes data
    ) external;

    function execTransaction(
        address to,
        uint256 value,
        bytes data,
        uint8 operation,
        uint256 safeTxGas,
        uint256 baseGas,
        uint256 gasPrice,
        address gasToken,
        address refundReceiver,
        bytes signatures
    ) external payable returns (bool success);
}

/// Parsed `approve(address,uint256)` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalParams {
    pub spender: Address,
    pub amount: U256,
}

impl ApprovalParams {
    /// Allowance equal to 2^256 - 1
    pub fn is_unlimited(&self) -> bool {
        self.amount == U256::MAX
    }
}

/// Decoder for method selectors and calldata
pub struct SelectorDecoder;

impl SelectorDecoder {
    /// Parse a `0x`-prefixed 4-byte method id; anything else is `None`
    pub fn parse_selector(method_id: &str) -> Option<[u8; 4]> {
        let bytes = Self::decode_hex(method_id)?;
        bytes.try_into().ok()
    }

    /// Decode hex calldata, tolerating a missing `0x` prefix
    pub fn decode_hex(input: &str) -> Option<Vec<u8>> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(digits).ok()
    }

    /// First four bytes of hex calldata
    pub fn selector_of(calldata_hex: &str) -> Option<[u8; 4]> {
        let bytes = Self::decode_hex(calldata_hex)?;
        bytes.get(..4)?.try_into().ok()
    }

    pub fn is_approve(selector: [u8; 4]) -> bool {
        selector == approveCall::SELECTOR
    }

    pub fn is_erc20_transfer(selector: [u8; 4]) -> bool {
        selector == transferCall::SELECTOR
    }

    pub fn is_nft_transfer(selector: [u8; 4]) -> bool {
        selector == safeTransferFrom_0Call::SELECTOR || selector == safeTransferFrom_1Call::SELECTOR
    }

    pub fn is_multisig_exec(selector: [u8; 4]) -> bool {
        selector == execTransactionCall::SELECTOR
    }

    /// Decode `approve(address,uint256)` calldata
    /// Returns None for any other selector or malformed payload
    pub fn decode_approval(calldata: &[u8]) -> Option<ApprovalParams> {
        if calldata.len() < 4 {
            return None;
        }
        let call = approveCall::abi_decode(calldata, false).ok()?;
        Some(ApprovalParams {
            spender: call.spender,
            amount: call.amount,
        })
    }

    /// Decode approval calldata given as hex
    pub fn decode_approval_hex(calldata_hex: &str) -> Option<ApprovalParams> {
        let bytes = Self::decode_hex(calldata_hex)?;
        Self::decode_approval(&bytes)
    }

    /// Hex encoding of a selector, `0x`-prefixed
    pub fn selector_hex(selector: [u8; 4]) -> String {
        format!("0x{}", hex::encode(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPROVE_MAX: &str = "0x095ea7b3\
        0000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488d\
        ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

    #[test]
    fn test_known_selectors() {
        assert_eq!(SelectorDecoder::selector_hex(approveCall::SELECTOR), "0x095ea7b3");
        assert_eq!(SelectorDecoder::selector_hex(transferCall::SELECTOR), "0xa9059cbb");
        assert_eq!(
            SelectorDecoder::selector_hex(safeTransferFrom_0Call::SELECTOR),
            "0x42842e0e"
        );
        assert_eq!(
            SelectorDecoder::selector_hex(safeTransferFrom_1Call::SELECTOR),
            "0xb88d4fde"
        );
        assert_eq!(
            SelectorDecoder::selector_hex(execTransactionCall::SELECTOR),
            "0x6a761202"
        );
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(
            SelectorDecoder::parse_selector("0x095EA7B3"),
            Some(approveCall::SELECTOR)
        );
        assert!(SelectorDecoder::parse_selector("0x095ea7").is_none());
        assert!(SelectorDecoder::parse_selector("approve").is_none());
    }

    #[test]
    fn test_decode_unlimited_approval() {
        let params = SelectorDecoder::decode_approval_hex(APPROVE_MAX).unwrap();
        assert!(params.is_unlimited());
        assert_eq!(
            params.spender,
            "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_decode_approval_short_calldata() {
        assert!(SelectorDecoder::decode_approval(&[0x09, 0x5e, 0xa7]).is_none());
        assert!(SelectorDecoder::decode_approval_hex("0xa9059cbb").is_none());
    }
}
