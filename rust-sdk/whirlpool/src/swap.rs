use futures::future::try_join_all;
use solana_pubkey::Pubkey;
use whirlpool_quote_core::{
    default_other_amount_threshold, default_sqrt_price_limit,
    get_swap_tick_array_start_indexes, swap_quote_with_slippage, SwapQuote, SwapQuoteParam,
    TickArrayAccount, Whirlpool,
};

use crate::{AccountReader, QuoteError, Result, TickArrayAddressDeriver};

/// Represents the type of a swap operation.
///
/// This enum is used to specify whether the swap is an exact input or exact output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapType {
    /// Indicates a swap where the input token amount is specified.
    ExactIn,

    /// Indicates a swap where the output token amount is specified.
    ExactOut,
}

/// Fetches the tick arrays a swap in the given direction may traverse, in traversal order.
///
/// All arrays are requested concurrently. Arrays that do not exist come back uninitialized
/// so the quote only fails if the swap actually reaches them.
pub async fn fetch_swap_tick_arrays<R, D>(
    reader: &R,
    deriver: &D,
    whirlpool_address: &Pubkey,
    whirlpool: &Whirlpool,
    a_to_b: bool,
) -> Result<Vec<TickArrayAccount>>
where
    R: AccountReader + ?Sized,
    D: TickArrayAddressDeriver + ?Sized,
{
    let start_tick_indexes = get_swap_tick_array_start_indexes(
        whirlpool.tick_current_index,
        whirlpool.tick_spacing,
        a_to_b,
    )?;

    let addresses = start_tick_indexes
        .iter()
        .map(|&start_tick_index| deriver.tick_array_address(whirlpool_address, start_tick_index))
        .collect::<Result<Vec<Pubkey>>>()?;

    let tick_arrays = try_join_all(addresses.iter().map(|address| reader.tick_array(address))).await?;

    Ok(start_tick_indexes
        .into_iter()
        .zip(addresses)
        .zip(tick_arrays)
        .map(|((start_tick_index, address), tick_array)| match tick_array {
            Some(tick_array) => TickArrayAccount::initialized(address, tick_array),
            None => TickArrayAccount::uninitialized(address, start_tick_index),
        })
        .collect())
}

/// Quotes a swap against the current state of a whirlpool.
///
/// # Arguments
///
/// * `reader` - The source of whirlpool and tick array accounts.
/// * `deriver` - Maps tick array start indexes to account addresses.
/// * `whirlpool_address` - The public key of the Whirlpool to quote against.
/// * `amount` - The token amount specified for the swap. For `SwapType::ExactIn`, this is the input token amount.
///   For `SwapType::ExactOut`, this is the output token amount.
/// * `specified_mint` - The mint of the token `amount` refers to.
/// * `swap_type` - The type of swap (`SwapType::ExactIn` or `SwapType::ExactOut`).
/// * `slippage_tolerance_bps` - An optional slippage tolerance, in basis points (BPS). Defaults to the global setting if not provided.
/// * `sqrt_price_limit` - An optional price the swap may not move past. Defaults to the end of the price range.
///
/// # Returns
///
/// A `SwapQuote` whose `other_amount_threshold` is the minimum output (exact in) or the
/// maximum input (exact out) after slippage.
///
/// # Errors
///
/// Returns an error if:
/// - The whirlpool does not exist or the reader fails.
/// - `specified_mint` is not one of the whirlpool's mints.
/// - The swap itself cannot be quoted, see `CoreError`.
#[allow(clippy::too_many_arguments)]
pub async fn swap_quote_by_token<R, D>(
    reader: &R,
    deriver: &D,
    whirlpool_address: Pubkey,
    amount: u64,
    specified_mint: Pubkey,
    swap_type: SwapType,
    slippage_tolerance_bps: Option<u16>,
    sqrt_price_limit: Option<u128>,
) -> Result<SwapQuote>
where
    R: AccountReader + ?Sized,
    D: TickArrayAddressDeriver + ?Sized,
{
    let slippage_tolerance_bps = match slippage_tolerance_bps {
        Some(tolerance) => tolerance,
        None => crate::slippage_tolerance_bps()?,
    };

    let whirlpool = reader.whirlpool(&whirlpool_address).await?;
    let specified_input = swap_type == SwapType::ExactIn;
    let specified_token_a = if specified_mint == whirlpool.token_mint_a {
        true
    } else if specified_mint == whirlpool.token_mint_b {
        false
    } else {
        return Err(QuoteError::MintNotInPool(specified_mint));
    };
    let a_to_b = specified_token_a == specified_input;

    let tick_arrays =
        fetch_swap_tick_arrays(reader, deriver, &whirlpool_address, &whirlpool, a_to_b).await?;

    let param = SwapQuoteParam {
        whirlpool,
        tick_arrays,
        token_amount: amount,
        sqrt_price_limit: sqrt_price_limit.unwrap_or(default_sqrt_price_limit(a_to_b)),
        other_amount_threshold: default_other_amount_threshold(specified_input),
        a_to_b,
        amount_specified_is_input: specified_input,
    };
    let quote = swap_quote_with_slippage(&param, slippage_tolerance_bps)?;

    tracing::debug!(
        whirlpool = %whirlpool_address,
        a_to_b,
        amount,
        estimated_amount_in = quote.estimated_amount_in,
        estimated_amount_out = quote.estimated_amount_out,
        other_amount_threshold = quote.other_amount_threshold,
        "swap quote"
    );

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reset_configuration, set_slippage_tolerance_bps, InMemoryAccountReader};
    use rstest::rstest;
    use serial_test::serial;
    use whirlpool_quote_core::{
        adjust_amount_for_slippage, tick_index_to_sqrt_price, CoreError, TickArray,
    };

    const TICK_SPACING: u16 = 64;

    fn whirlpool_address() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn mint_a() -> Pubkey {
        Pubkey::new_from_array([2; 32])
    }

    fn mint_b() -> Pubkey {
        Pubkey::new_from_array([3; 32])
    }

    fn derive_address(whirlpool: &Pubkey, start_tick_index: i32) -> Result<Pubkey> {
        let mut bytes = whirlpool.to_bytes();
        bytes[..4].copy_from_slice(&start_tick_index.to_le_bytes());
        Ok(Pubkey::new_from_array(bytes))
    }

    fn test_whirlpool() -> Whirlpool {
        Whirlpool {
            tick_spacing: TICK_SPACING,
            fee_rate: 3000,
            liquidity: 1_000_000_000_000,
            sqrt_price: tick_index_to_sqrt_price(2816).unwrap(),
            tick_current_index: 2816,
            token_mint_a: mint_a(),
            token_mint_b: mint_b(),
            ..Default::default()
        }
    }

    fn test_reader() -> InMemoryAccountReader {
        let address = whirlpool_address();
        InMemoryAccountReader::new()
            .with_whirlpool(address, test_whirlpool())
            .with_tick_array(
                derive_address(&address, 0).unwrap(),
                TickArray::new(address, 0),
            )
    }

    #[tokio::test]
    async fn test_fetch_swap_tick_arrays() {
        let reader = test_reader();
        let whirlpool = test_whirlpool();
        let address = whirlpool_address();

        let a_to_b = fetch_swap_tick_arrays(&reader, &derive_address, &address, &whirlpool, true)
            .await
            .unwrap();
        let starts: Vec<i32> = a_to_b.iter().map(|x| x.start_tick_index).collect();
        assert_eq!(starts, vec![0, -5632, -11264]);
        assert!(a_to_b[0].data.is_some());
        assert!(a_to_b[1].data.is_none());
        assert_eq!(a_to_b[2].address, derive_address(&address, -11264).unwrap());

        let b_to_a = fetch_swap_tick_arrays(&reader, &derive_address, &address, &whirlpool, false)
            .await
            .unwrap();
        let starts: Vec<i32> = b_to_a.iter().map(|x| x.start_tick_index).collect();
        assert_eq!(starts, vec![0, 5632, 11264]);
    }

    #[tokio::test]
    async fn test_swap_quote_matches_core() {
        let reader = test_reader();
        let quote = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            1_000_000,
            mint_a(),
            SwapType::ExactIn,
            Some(50),
            None,
        )
        .await
        .unwrap();

        let tick_arrays = fetch_swap_tick_arrays(
            &reader,
            &derive_address,
            &whirlpool_address(),
            &test_whirlpool(),
            true,
        )
        .await
        .unwrap();
        let param = SwapQuoteParam {
            whirlpool: test_whirlpool(),
            tick_arrays,
            token_amount: 1_000_000,
            sqrt_price_limit: default_sqrt_price_limit(true),
            other_amount_threshold: 0,
            a_to_b: true,
            amount_specified_is_input: true,
        };
        assert_eq!(quote, swap_quote_with_slippage(&param, 50).unwrap());
        assert!(quote.a_to_b);
        assert_eq!(quote.estimated_amount_in, 1_000_000);
        assert_eq!(
            quote.other_amount_threshold,
            adjust_amount_for_slippage(quote.estimated_amount_out, 50, false)
        );
    }

    #[rstest]
    #[case(SwapType::ExactIn, true, true)]
    #[case(SwapType::ExactIn, false, false)]
    #[case(SwapType::ExactOut, true, false)]
    #[case(SwapType::ExactOut, false, true)]
    #[tokio::test]
    async fn test_swap_direction(
        #[case] swap_type: SwapType,
        #[case] specified_token_a: bool,
        #[case] expected_a_to_b: bool,
    ) {
        let reader = test_reader();
        let specified_mint = if specified_token_a { mint_a() } else { mint_b() };
        let quote = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            1000,
            specified_mint,
            swap_type,
            Some(100),
            None,
        )
        .await
        .unwrap();

        assert_eq!(quote.a_to_b, expected_a_to_b);
        if swap_type == SwapType::ExactIn {
            assert_eq!(quote.estimated_amount_in, 1000);
        } else {
            assert_eq!(quote.estimated_amount_out, 1000);
            assert!(quote.other_amount_threshold >= quote.estimated_amount_in);
        }
    }

    #[tokio::test]
    async fn test_swap_quote_missing_whirlpool() {
        let reader = InMemoryAccountReader::new();
        let result = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            1000,
            mint_a(),
            SwapType::ExactIn,
            Some(100),
            None,
        )
        .await;
        assert!(matches!(result, Err(QuoteError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_swap_quote_unknown_mint() {
        let reader = test_reader();
        let unknown_mint = Pubkey::new_from_array([9; 32]);
        let result = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            1000,
            unknown_mint,
            SwapType::ExactIn,
            Some(100),
            None,
        )
        .await;
        assert!(matches!(result, Err(QuoteError::MintNotInPool(mint)) if mint == unknown_mint));
    }

    #[tokio::test]
    async fn test_swap_quote_core_error() {
        let reader = test_reader();
        let result = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            0,
            mint_a(),
            SwapType::ExactIn,
            Some(100),
            None,
        )
        .await;
        assert!(matches!(
            result,
            Err(QuoteError::Core(CoreError::ZeroTradableAmount))
        ));
    }

    #[tokio::test]
    async fn test_swap_quote_price_limit() {
        let reader = test_reader();
        let sqrt_price_limit = tick_index_to_sqrt_price(2800).unwrap();
        let quote = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            u32::MAX as u64,
            mint_a(),
            SwapType::ExactIn,
            Some(100),
            Some(sqrt_price_limit),
        )
        .await
        .unwrap();
        assert_eq!(quote.estimated_end_sqrt_price, sqrt_price_limit);
        assert_eq!(quote.estimated_end_tick_index, 2800);
        assert!(quote.estimated_amount_in < u32::MAX as u64);
    }

    #[tokio::test]
    #[serial]
    async fn test_swap_quote_default_slippage() {
        set_slippage_tolerance_bps(200).unwrap();
        let reader = test_reader();
        let quote = swap_quote_by_token(
            &reader,
            &derive_address,
            whirlpool_address(),
            1_000_000,
            mint_a(),
            SwapType::ExactIn,
            None,
            None,
        )
        .await
        .unwrap();
        reset_configuration().unwrap();

        assert_eq!(
            quote.other_amount_threshold,
            adjust_amount_for_slippage(quote.estimated_amount_out, 200, false)
        );
    }
}
