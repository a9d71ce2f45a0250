//! Human-friendly durations in Go `time.ParseDuration` syntax.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix: `100ms`, `1.5h`, `1h30m`, `720h0m0s`.
//! Units are `ns`, `us` (`µs`), `ms`, `s`, `m`, `h`, plus `d` for days.
//! A bare number other than `0` is rejected so that `--delay 100` is
//! never silently read as 100 seconds.

use std::time::Duration;

use anyhow::{Result, bail};

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
  Some(match unit {
    "ns" => 1,
    "us" | "µs" | "μs" => 1_000,
    "ms" => 1_000_000,
    "s" => NANOS_PER_SEC,
    "m" => 60 * NANOS_PER_SEC,
    "h" => 3_600 * NANOS_PER_SEC,
    "d" => 86_400 * NANOS_PER_SEC,
    _ => return None,
  })
}

pub fn parse_duration(input: &str) -> Result<Duration> {
  let s = input.trim();
  let s = s.strip_prefix('+').unwrap_or(s);
  if s.starts_with('-') {
    bail!("duration {input:?} must not be negative");
  }
  if s == "0" {
    return Ok(Duration::ZERO);
  }
  if s.is_empty() {
    bail!("duration {input:?} is empty");
  }

  let mut total: u128 = 0;
  let mut rest = s;

  while !rest.is_empty() {
    let int_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (int_part, after_int) = rest.split_at(int_end);

    let (frac_part, after_num) = match after_int.strip_prefix('.') {
      Some(after_dot) => {
        let frac_end = after_dot
          .find(|c: char| !c.is_ascii_digit())
          .unwrap_or(after_dot.len());
        after_dot.split_at(frac_end)
      }
      None => ("", after_int),
    };
    if int_part.is_empty() && frac_part.is_empty() {
      bail!("duration {input:?} has a unit without a value");
    }

    let unit_end = after_num
      .find(|c: char| c.is_ascii_digit() || c == '.')
      .unwrap_or(after_num.len());
    let (unit, next) = after_num.split_at(unit_end);
    if unit.is_empty() {
      bail!("duration {input:?} is missing a unit (ns, us, ms, s, m, h, d)");
    }
    let Some(scale) = unit_nanos(unit) else {
      bail!("duration {input:?} has unknown unit {unit:?}");
    };

    let whole: u128 = if int_part.is_empty() {
      0
    } else {
      match int_part.parse() {
        Ok(v) => v,
        Err(_) => bail!("duration {input:?} is out of range"),
      }
    };
    let mut part = whole.checked_mul(scale);

    // Digits beyond nanosecond precision cannot contribute.
    let frac_digits = &frac_part[..frac_part.len().min(18)];
    if !frac_digits.is_empty() {
      let numerator: u128 = frac_digits.parse().unwrap_or(0);
      let denominator = 10u128.checked_pow(u32::try_from(frac_digits.len()).unwrap_or(u32::MAX));
      part = match (part, numerator.checked_mul(scale), denominator) {
        (Some(p), Some(n), Some(d)) => p.checked_add(n / d),
        _ => None,
      };
    }

    let Some(sum) = part.and_then(|p| total.checked_add(p)) else {
      bail!("duration {input:?} is out of range");
    };
    total = sum;
    rest = next;
  }

  let secs = u64::try_from(total / NANOS_PER_SEC);
  let nanos = u32::try_from(total % NANOS_PER_SEC);
  match (secs, nanos) {
    (Ok(secs), Ok(nanos)) => Ok(Duration::new(secs, nanos)),
    _ => bail!("duration {input:?} is out of range"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_units() {
    assert_eq!(parse_duration("100ms").unwrap(), Duration::from_millis(100));
    assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
    assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
    assert_eq!(parse_duration("720h").unwrap(), Duration::from_secs(30 * 86_400));
    assert_eq!(parse_duration(" 30d ").unwrap(), Duration::from_secs(30 * 86_400));
    assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
    assert_eq!(parse_duration("250µs").unwrap(), Duration::from_micros(250));
    assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
  }

  #[test]
  fn test_compound_durations() {
    assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5_400));
    assert_eq!(parse_duration("720h0m0s").unwrap(), Duration::from_secs(30 * 86_400));
    assert_eq!(parse_duration("1m0.5s").unwrap(), Duration::from_millis(60_500));
    assert_eq!(parse_duration("2160h").unwrap(), Duration::from_secs(7_776_000));
  }

  #[test]
  fn test_fractional_durations() {
    assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5_400));
    assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
    assert_eq!(parse_duration("1.s").unwrap(), Duration::from_secs(1));
    assert_eq!(parse_duration("0.1ms").unwrap(), Duration::from_micros(100));
  }

  #[test]
  fn test_zero_and_sign() {
    assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    assert_eq!(parse_duration("+1s").unwrap(), Duration::from_secs(1));
    assert!(parse_duration("-1s").is_err());
  }

  #[test]
  fn test_rejects_bad_input() {
    assert!(parse_duration("100").is_err());
    assert!(parse_duration("1h30").is_err());
    assert!(parse_duration("h").is_err());
    assert!(parse_duration(".h").is_err());
    assert!(parse_duration("10y").is_err());
    assert!(parse_duration("").is_err());
    assert!(parse_duration("99999999999999999999999h").is_err());
  }
}
