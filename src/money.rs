use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// minor units per major unit (1 rupiah = 100 sen)
pub const FRACTION: i64 = 100;

/// minor-unit-exact monetary value, stored as an integer count of sen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// ISO 4217 code for the single currency this crate bills in
    pub const CURRENCY_CODE: &'static str = "IDR";

    /// create from a (major, minor) pair
    pub fn new(major: i64, minor: i64) -> Self {
        Money(major * FRACTION + minor)
    }

    /// create from whole major units
    pub fn from_major(major: i64) -> Self {
        Money(major * FRACTION)
    }

    /// create from raw minor units
    pub fn from_minor_units(minor: i64) -> Self {
        Money(minor)
    }

    /// whole-unit part, truncated toward zero
    pub fn major(&self) -> i64 {
        self.0 / FRACTION
    }

    /// fractional part in minor units
    pub fn minor(&self) -> i64 {
        self.0 % FRACTION
    }

    /// raw minor-unit count
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// integer division, truncating toward zero; dividing by zero is an
    /// intentional no-op that returns the value unchanged
    pub fn divide(self, divisor: i64) -> Money {
        if divisor == 0 {
            return self;
        }

        Money(self.0 / divisor)
    }

    /// decimal rendering suitable for `rust_decimal` parsing
    pub fn decimal_string(&self) -> String {
        format!("{}.{:02}", self.major(), self.minor().abs())
    }

    /// exact decimal view of the value
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {},{:02}", self.major(), self.minor().abs())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money(self.0 * factor)
    }
}

/// annual interest rate in basis points (1 bp = 0.01%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct BasisPoints(i32);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);

    pub fn new(bps: i32) -> Self {
        BasisPoints(bps)
    }

    /// whole percentage, truncated (1050 bps -> 10%)
    pub fn to_percentage(&self) -> i64 {
        i64::from(self.0) / 100
    }

    pub fn from_percentage(percent: i32) -> Self {
        BasisPoints(percent * 100)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

/// arbitrary-precision percentage rate, the decimal alternative to the
/// truncating basis-point math
#[derive(Debug, Clone, PartialEq)]
pub struct PreciseRate(Decimal);

impl PreciseRate {
    /// parse from a percentage string, e.g. "10.50"
    pub fn parse(rate: &str) -> Result<Self, rust_decimal::Error> {
        Ok(PreciseRate(Decimal::from_str(rate)?))
    }

    /// exact percentage view of a basis-point rate
    pub fn from_bps(bps: BasisPoints) -> Self {
        PreciseRate(Decimal::from(bps.as_i32()) / Decimal::from(100))
    }

    /// interest owed on a principal at this rate, without truncation
    pub fn interest_on(&self, principal: Money) -> Result<Decimal, rust_decimal::Error> {
        let precise_principal = Decimal::from_str(&principal.decimal_string())?;
        Ok(precise_principal * (self.0 / Decimal::from(100)))
    }
}
