//! Reference vesting schedules.

use serde::{Deserialize, Serialize};

use bank_types::{Coin, Coins, Timestamp};

use crate::VestingError;

/// One step of a periodic schedule: `amount` unlocks `length` seconds after
/// the previous step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub length: u64,
    pub amount: Coins,
}

/// How an account's original vesting amount unlocks over time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VestingSchedule {
    /// Unlocks linearly between `start` and `end`.
    Continuous {
        original: Coins,
        start: Timestamp,
        end: Timestamp,
    },
    /// Everything unlocks at once at `end`.
    Delayed { original: Coins, end: Timestamp },
    /// Unlocks in discrete steps starting from `start`.
    Periodic {
        original: Coins,
        start: Timestamp,
        periods: Vec<Period>,
    },
}

impl VestingSchedule {
    pub fn original(&self) -> &Coins {
        match self {
            Self::Continuous { original, .. }
            | Self::Delayed { original, .. }
            | Self::Periodic { original, .. } => original,
        }
    }

    /// When the last coin unlocks.
    pub fn end_time(&self) -> Timestamp {
        match self {
            Self::Continuous { end, .. } | Self::Delayed { end, .. } => *end,
            Self::Periodic { start, periods, .. } => {
                start.plus_secs(periods.iter().map(|p| p.length).fold(0u64, u64::saturating_add))
            }
        }
    }

    pub fn validate(&self) -> Result<(), VestingError> {
        match self {
            Self::Continuous { start, end, .. } if end <= start => Err(
                VestingError::InvalidSchedule(format!("end {end} must be after start {start}")),
            ),
            Self::Periodic {
                original, periods, ..
            } => {
                let mut total = Coins::empty();
                for period in periods {
                    total = total
                        .checked_add(&period.amount)
                        .map_err(|e| VestingError::InvalidSchedule(e.to_string()))?;
                }
                if &total != original {
                    return Err(VestingError::InvalidSchedule(format!(
                        "periods sum to {total}, original is {original}"
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Coins unlocked at `at`.
    pub fn vested_coins(&self, at: Timestamp) -> Coins {
        match self {
            Self::Continuous {
                original,
                start,
                end,
            } => {
                if at <= *start {
                    return Coins::empty();
                }
                if at >= *end {
                    return original.clone();
                }
                let elapsed = start.elapsed_since(at);
                let duration = start.elapsed_since(*end);
                let vested: Vec<Coin> = original
                    .iter()
                    .map(|c| Coin {
                        denom: c.denom.clone(),
                        // elapsed < duration, so the quotient never exceeds the original
                        amount: c.amount.mul_div_floor(elapsed, duration).unwrap_or(c.amount),
                    })
                    .collect();
                Coins::new(vested).unwrap_or_default()
            }
            Self::Delayed { original, end } => {
                if at >= *end {
                    original.clone()
                } else {
                    Coins::empty()
                }
            }
            Self::Periodic {
                original,
                start,
                periods,
            } => {
                if at <= *start {
                    return Coins::empty();
                }
                let mut vested = Coins::empty();
                let mut period_start = *start;
                for period in periods {
                    if period_start.elapsed_since(at) < period.length {
                        break;
                    }
                    vested = match vested.checked_add(&period.amount) {
                        Ok(sum) => sum,
                        Err(_) => return original.clone(),
                    };
                    period_start = period_start.plus_secs(period.length);
                }
                vested
            }
        }
    }

    /// Coins still locked at `at`.
    pub fn locked_coins(&self, at: Timestamp) -> Coins {
        self.original().saturating_sub(&self.vested_coins(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn continuous_unlocks_linearly() {
        let schedule = VestingSchedule::Continuous {
            original: coins("50foo"),
            start: Timestamp::new(1_000),
            end: Timestamp::new(1_000 + 3_600),
        };
        assert_eq!(schedule.locked_coins(Timestamp::new(1_000)), coins("50foo"));
        assert_eq!(schedule.locked_coins(Timestamp::new(1_000 + 1_800)), coins("25foo"));
        assert_eq!(schedule.locked_coins(Timestamp::new(1_000 + 3_600)), Coins::empty());
        assert_eq!(schedule.locked_coins(Timestamp::new(999_999)), Coins::empty());
    }

    #[test]
    fn continuous_rounds_vested_down() {
        let schedule = VestingSchedule::Continuous {
            original: coins("10foo"),
            start: Timestamp::new(0),
            end: Timestamp::new(3),
        };
        // 10 * 1/3 = 3.33 vested -> 3, so 7 stay locked
        assert_eq!(schedule.locked_coins(Timestamp::new(1)), coins("7foo"));
    }

    #[test]
    fn delayed_unlocks_at_end() {
        let schedule = VestingSchedule::Delayed {
            original: coins("100atom"),
            end: Timestamp::new(500),
        };
        assert_eq!(schedule.locked_coins(Timestamp::new(499)), coins("100atom"));
        assert_eq!(schedule.locked_coins(Timestamp::new(500)), Coins::empty());
    }

    #[test]
    fn periodic_unlocks_in_steps() {
        let schedule = VestingSchedule::Periodic {
            original: coins("30atom"),
            start: Timestamp::new(100),
            periods: vec![
                Period {
                    length: 10,
                    amount: coins("10atom"),
                },
                Period {
                    length: 10,
                    amount: coins("20atom"),
                },
            ],
        };
        schedule.validate().unwrap();
        assert_eq!(schedule.locked_coins(Timestamp::new(109)), coins("30atom"));
        assert_eq!(schedule.locked_coins(Timestamp::new(110)), coins("20atom"));
        assert_eq!(schedule.locked_coins(Timestamp::new(120)), Coins::empty());
        assert_eq!(schedule.end_time(), Timestamp::new(120));
    }

    #[test]
    fn validation() {
        let backwards = VestingSchedule::Continuous {
            original: coins("1foo"),
            start: Timestamp::new(10),
            end: Timestamp::new(10),
        };
        assert!(backwards.validate().is_err());

        let mismatched = VestingSchedule::Periodic {
            original: coins("30atom"),
            start: Timestamp::new(0),
            periods: vec![Period {
                length: 5,
                amount: coins("10atom"),
            }],
        };
        assert!(mismatched.validate().is_err());
    }

    #[test]
    fn schedule_json_is_tagged() {
        let schedule = VestingSchedule::Delayed {
            original: coins("5foo"),
            end: Timestamp::new(7),
        };
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["type"], "delayed");
    }
}
