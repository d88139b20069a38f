//! 输入校验
//!
//! 所有校验都在发出任何网络请求之前执行，失败时返回带字段名的
//! [`MonorailError::Validation`]。

use crate::error::{MonorailError, Result};
use crate::types::Amount;

pub const MAX_SLIPPAGE_BPS: i64 = 10_000;
pub const MAX_DEADLINE_SECONDS: i64 = 3_600;
pub const MIN_HOPS: i64 = 1;
pub const MAX_HOPS: i64 = 5;
pub const MAX_PAGE_LIMIT: i64 = 1_000;

/// 校验 `0x` + 40 位十六进制的地址（不区分大小写）
pub fn validate_address(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(MonorailError::validation(format!("{} is required", field), field));
    }

    if !value.starts_with("0x") {
        return Err(MonorailError::validation(
            format!("{} must start with 0x", field),
            field,
        ));
    }

    if value.len() != 42 {
        return Err(MonorailError::validation(
            format!("{} must be 42 characters long", field),
            field,
        ));
    }

    if !value[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MonorailError::validation(
            format!("{} contains invalid characters", field),
            field,
        ));
    }

    Ok(())
}

/// 校验数量：必须能解析为有限且大于 0 的十进制数
pub fn validate_amount(value: Option<&Amount>, field: &str) -> Result<()> {
    let amount = match value {
        Some(Amount::Text(s)) if s.trim().is_empty() => None,
        other => other,
    }
    .ok_or_else(|| MonorailError::validation(format!("{} is required", field), field))?;

    let parsed = parse_amount(amount).ok_or_else(|| {
        MonorailError::validation(format!("{} must be a valid number", field), field)
    })?;

    if parsed <= 0.0 {
        return Err(MonorailError::validation(
            format!("{} must be greater than 0", field),
            field,
        ));
    }

    Ok(())
}

/// 将数量解析为浮点数；NaN、无穷大和无法解析的文本返回 `None`
pub fn parse_amount(amount: &Amount) -> Option<f64> {
    let value = match amount {
        Amount::Text(s) => s.trim().parse::<f64>().ok()?,
        Amount::Number(n) => *n,
    };
    value.is_finite().then_some(value)
}

/// 滑点（基点），范围 [0, 10000]
pub fn validate_slippage(value: Option<i64>) -> Result<()> {
    match value {
        Some(bps) if !(0..=MAX_SLIPPAGE_BPS).contains(&bps) => Err(MonorailError::validation(
            "Slippage must be between 0 and 10000 basis points (0-100%)",
            "slippage",
        )),
        _ => Ok(()),
    }
}

/// 截止时间（秒），范围 (0, 3600]
pub fn validate_deadline(value: Option<i64>) -> Result<()> {
    match value {
        Some(seconds) if seconds <= 0 => Err(MonorailError::validation(
            "Deadline must be greater than 0",
            "deadline",
        )),
        Some(seconds) if seconds > MAX_DEADLINE_SECONDS => Err(MonorailError::validation(
            "Deadline cannot exceed 1 hour (3600 seconds)",
            "deadline",
        )),
        _ => Ok(()),
    }
}

/// 最大跳数，范围 [1, 5]
pub fn validate_max_hops(value: Option<i64>) -> Result<()> {
    match value {
        Some(hops) if !(MIN_HOPS..=MAX_HOPS).contains(&hops) => Err(MonorailError::validation(
            "Max hops must be between 1 and 5",
            "max_hops",
        )),
        _ => Ok(()),
    }
}

/// 分页参数：offset ≥ 0，limit ∈ (0, 1000]
pub fn validate_pagination(offset: Option<i64>, limit: Option<i64>) -> Result<()> {
    if let Some(offset) = offset {
        if offset < 0 {
            return Err(MonorailError::validation(
                "Offset must be non-negative",
                "offset",
            ));
        }
    }

    if let Some(limit) = limit {
        if limit <= 0 {
            return Err(MonorailError::validation(
                "Limit must be greater than 0",
                "limit",
            ));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(MonorailError::validation(
                "Limit cannot exceed 1000",
                "limit",
            ));
        }
    }

    Ok(())
}

/// 报价与交换共用的参数校验
pub fn validate_trade_params(
    amount: &Amount,
    slippage: Option<i64>,
    deadline: Option<i64>,
    max_hops: Option<i64>,
) -> Result<()> {
    validate_amount(Some(amount), "amount")?;
    validate_slippage(slippage)?;
    validate_deadline(deadline)?;
    validate_max_hops(max_hops)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0";

    #[test]
    fn test_valid_addresses() {
        assert!(validate_address(ADDR, "address").is_ok());
        assert!(validate_address(&ADDR.to_lowercase(), "address").is_ok());
        assert!(validate_address(&ADDR.to_uppercase().replacen("0X", "0x", 1), "address").is_ok());
        assert!(validate_address(crate::types::NATIVE_TOKEN_ADDRESS, "address").is_ok());
    }

    #[test]
    fn test_invalid_addresses_carry_field() {
        let cases = [
            ("", "sender is required"),
            ("742d35Cc6634C0532925a3b844Bc9e7595f0bEb0aa", "sender must start with 0x"),
            ("0x742d35", "sender must be 42 characters long"),
            (
                "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEbZ",
                "sender contains invalid characters",
            ),
        ];

        for (input, message) in cases {
            let err = validate_address(input, "sender").unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.field(), Some("sender"));
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_multibyte_address_does_not_panic() {
        // 42 字节但包含非 ASCII 字符
        let input = format!("0x{}é", "a".repeat(38));
        assert_eq!(input.len(), 42);
        assert!(validate_address(&input, "address").is_err());
    }

    #[test]
    fn test_valid_amounts() {
        for amount in [
            Amount::from("1"),
            Amount::from("0.000001"),
            Amount::from(" 12.5 "),
            Amount::from("1e3"),
            Amount::from(0.5),
            Amount::from(100.0),
            Amount::from("0.00000000000000000000000000000001"),
            Amount::from("1e30"),
            Amount::from(1e30),
            Amount::from(1e-30),
        ] {
            assert!(validate_amount(Some(&amount), "amount").is_ok(), "{:?}", amount);
        }
    }

    #[test]
    fn test_invalid_amounts() {
        let cases = [
            (None, "amount is required"),
            (Some(Amount::from("")), "amount is required"),
            (Some(Amount::from("abc")), "amount must be a valid number"),
            (Some(Amount::from(f64::NAN)), "amount must be a valid number"),
            (Some(Amount::from(f64::INFINITY)), "amount must be a valid number"),
            (Some(Amount::from("0")), "amount must be greater than 0"),
            (Some(Amount::from("-1")), "amount must be greater than 0"),
            (Some(Amount::from(-0.1)), "amount must be greater than 0"),
            (Some(Amount::from("inf")), "amount must be a valid number"),
            (Some(Amount::from("1e400")), "amount must be a valid number"),
        ];

        for (input, message) in cases {
            let err = validate_amount(input.as_ref(), "amount").unwrap_err();
            assert_eq!(err.field(), Some("amount"));
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_slippage_bounds() {
        assert!(validate_slippage(None).is_ok());
        assert!(validate_slippage(Some(0)).is_ok());
        assert!(validate_slippage(Some(50)).is_ok());
        assert!(validate_slippage(Some(10_000)).is_ok());
        assert!(validate_slippage(Some(10_001)).is_err());
        assert_eq!(
            validate_slippage(Some(-1)).unwrap_err().field(),
            Some("slippage")
        );
    }

    #[test]
    fn test_deadline_bounds() {
        assert!(validate_deadline(None).is_ok());
        assert!(validate_deadline(Some(1)).is_ok());
        assert!(validate_deadline(Some(3_600)).is_ok());
        assert!(validate_deadline(Some(0)).is_err());
        assert!(validate_deadline(Some(-5)).is_err());
        assert!(validate_deadline(Some(3_601)).is_err());
    }

    #[test]
    fn test_max_hops_bounds() {
        assert!(validate_max_hops(None).is_ok());
        for hops in 1..=5 {
            assert!(validate_max_hops(Some(hops)).is_ok());
        }
        assert!(validate_max_hops(Some(0)).is_err());
        assert_eq!(validate_max_hops(Some(6)).unwrap_err().field(), Some("max_hops"));
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(validate_pagination(None, None).is_ok());
        assert!(validate_pagination(Some(0), Some(1)).is_ok());
        assert!(validate_pagination(Some(500), Some(1_000)).is_ok());
        assert_eq!(
            validate_pagination(Some(-1), None).unwrap_err().field(),
            Some("offset")
        );
        assert_eq!(
            validate_pagination(None, Some(0)).unwrap_err().field(),
            Some("limit")
        );
        assert!(validate_pagination(None, Some(1_001)).is_err());
    }

    #[test]
    fn test_trade_params_stop_at_first_failure() {
        let err = validate_trade_params(&Amount::from("1"), Some(20_000), Some(0), Some(9))
            .unwrap_err();
        assert_eq!(err.field(), Some("slippage"));
    }
}
