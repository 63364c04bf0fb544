/// Errors raised by the quote and liquidity math.
///
/// Values are compared by variant. No operation returns a partial result together with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Provided sqrt price out of bounds")]
    SqrtPriceOutOfBounds,

    #[error("Provided sqrt price limit is not in the swap direction")]
    InvalidSqrtPriceLimitDirection,

    #[error("There are no tradable amount to swap")]
    ZeroTradableAmount,

    #[error("Tick array sequence is invalid for this swap")]
    TickArraySequenceInvalid,

    #[error("Tick array {0} of the sequence is not initialized")]
    TickArrayIndexNotInitialized(usize),

    #[error("Swap traverses more tick arrays than allowed")]
    TickArrayCrossingAboveMax,

    #[error("Amount out below minimum threshold")]
    AmountOutBelowMinimum,

    #[error("Amount in above maximum threshold")]
    AmountInAboveMaximum,

    #[error("Tick index out of bounds")]
    TickIndexOutOfBounds,

    #[error("Tick index is not covered by the tick array")]
    TickIndexNotInArray,

    #[error("Tick spacing must be greater than zero")]
    InvalidTickSpacing,

    #[error("Tick offset must be within the tick array")]
    InvalidTickArrayOffset,

    #[error("Multiplication overflow")]
    MultiplicationOverflow,

    #[error("Multiplication with shift right overflow")]
    MulDivOverflow,

    #[error("Division by zero")]
    DivideByZero,

    #[error("Exceeded token max")]
    TokenMaxExceeded,

    #[error("Did not meet token min")]
    TokenMinSubceeded,

    #[error("Liquidity overflow")]
    LiquidityOverflow,

    #[error("Liquidity underflow")]
    LiquidityUnderflow,

    #[error("Amount remaining overflows")]
    AmountRemainingOverflow,

    #[error("Amount calculated overflows")]
    AmountCalcOverflow,

    #[error("Unable to cast number into the target type")]
    NumberCastError,
}

pub type Result<T> = std::result::Result<T, CoreError>;
