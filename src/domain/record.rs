//! Record parser for the pipe-delimited export line format.
//!
//! Two record kinds: `INFO|<dataSymbol>|<name>` and
//! `TRADE|<entryDate>|<entryTime>|<entryPrice>|<entryLabel>|<exitDate>|<exitTime>|<exitPrice>|<exitLabel>|<grossProfit>|<contracts>|<position>`
//! with dates as `DD/MM/YYYY`. Pure and stateless; all I/O lives in the
//! scanner adapter.

use crate::domain::error::RecordError;
use crate::domain::model::{Trade, TradingSystem};

pub const INFO: &str = "INFO";
pub const TRADE: &str = "TRADE";

const INFO_FIELDS: usize = 3;
const TRADE_FIELDS: usize = 12;

// Dates must land in the year range [2000, 3000) once encoded as YYYYMMDD.
const DATE_MIN: i32 = 20_000_000;
const DATE_MAX: i32 = 30_000_000;

/// Apply one raw line to the trading system under construction. A failed
/// TRADE line appends nothing.
pub fn apply_line(ts: &mut TradingSystem, line: &str) -> Result<(), RecordError> {
    let tokens: Vec<&str> = line.split('|').collect();

    match tokens[0] {
        INFO => apply_info(ts, &tokens),
        TRADE => apply_trade(ts, &tokens),
        other => Err(RecordError::UnknownKind {
            kind: other.to_string(),
        }),
    }
}

/// Assign data symbol and display name. A file may carry more than one INFO
/// line; the last one wins.
fn apply_info(ts: &mut TradingSystem, tokens: &[&str]) -> Result<(), RecordError> {
    if tokens.len() != INFO_FIELDS {
        return Err(RecordError::FieldCount {
            kind: INFO,
            expected: INFO_FIELDS - 1,
            found: tokens.len() - 1,
        });
    }

    ts.data_symbol = tokens[1].to_string();
    ts.name = tokens[2].to_string();
    Ok(())
}

fn apply_trade(ts: &mut TradingSystem, tokens: &[&str]) -> Result<(), RecordError> {
    if tokens.len() != TRADE_FIELDS {
        return Err(RecordError::FieldCount {
            kind: TRADE,
            expected: TRADE_FIELDS - 1,
            found: tokens.len() - 1,
        });
    }

    let trade = Trade {
        entry_date: convert_date(tokens[1])?,
        entry_time: parse_int("entry time", tokens[2])?,
        entry_price: parse_float("entry price", tokens[3])?,
        entry_label: tokens[4].to_string(),
        exit_date: convert_date(tokens[5])?,
        exit_time: parse_int("exit time", tokens[6])?,
        exit_price: parse_float("exit price", tokens[7])?,
        exit_label: tokens[8].to_string(),
        gross_profit: parse_float("gross profit", tokens[9])?,
        contracts: parse_int("contracts", tokens[10])?,
        position: parse_int("position", tokens[11])?,
    };

    ts.trades.push(trade);
    Ok(())
}

fn parse_int(field: &'static str, value: &str) -> Result<i32, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Convert a `DD/MM/YYYY` date to its 8-digit `YYYYMMDD` integer encoding.
/// Components are concatenated without re-padding, so a short component like
/// `1/3/2024` fails the range check instead of being normalized.
pub fn convert_date(text: &str) -> Result<i32, RecordError> {
    let parts: Vec<&str> = text.split('/').collect();

    if parts.len() != 3 {
        return Err(RecordError::DateFormat {
            value: text.to_string(),
        });
    }

    let value: i32 = format!("{}{}{}", parts[2], parts[1], parts[0])
        .parse()
        .map_err(|_| RecordError::DateFormat {
            value: text.to_string(),
        })?;

    if !(DATE_MIN..DATE_MAX).contains(&value) {
        return Err(RecordError::DateOutOfRange {
            value: text.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_single(line: &str) -> Result<TradingSystem, RecordError> {
        let mut ts = TradingSystem::new();
        apply_line(&mut ts, line)?;
        Ok(ts)
    }

    #[test]
    fn info_sets_symbol_and_name() {
        let ts = parse_single("INFO|ES|Opening Range Breakout").unwrap();
        assert_eq!(ts.data_symbol, "ES");
        assert_eq!(ts.name, "Opening Range Breakout");
        assert!(ts.trades.is_empty());
    }

    #[test]
    fn later_info_line_wins() {
        let mut ts = TradingSystem::new();
        apply_line(&mut ts, "INFO|ES|First").unwrap();
        apply_line(&mut ts, "INFO|NQ|Second").unwrap();
        assert_eq!(ts.data_symbol, "NQ");
        assert_eq!(ts.name, "Second");
    }

    #[test]
    fn info_with_wrong_field_count_fails() {
        let err = parse_single("INFO|ES").unwrap_err();
        assert_eq!(
            err,
            RecordError::FieldCount {
                kind: INFO,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn trade_line_parses_all_fields() {
        let ts = parse_single(
            "TRADE|01/03/2024|930|100.5|EntryA|01/03/2024|1600|105.25|ExitA|475.00|2|1",
        )
        .unwrap();

        assert_eq!(ts.trades.len(), 1);
        let trade = &ts.trades[0];
        assert_eq!(trade.entry_date, 20240301);
        assert_eq!(trade.entry_time, 930);
        assert_eq!(trade.entry_price, 100.5);
        assert_eq!(trade.entry_label, "EntryA");
        assert_eq!(trade.exit_date, 20240301);
        assert_eq!(trade.exit_time, 1600);
        assert_eq!(trade.exit_price, 105.25);
        assert_eq!(trade.exit_label, "ExitA");
        assert_eq!(trade.gross_profit, 475.0);
        assert_eq!(trade.contracts, 2);
        assert_eq!(trade.position, 1);
    }

    #[test]
    fn short_position_carried_through_unchanged() {
        let ts = parse_single(
            "TRADE|05/06/2024|1015|4000.0|Short|05/06/2024|1430|3980.5|Cover|39.0|1|-1",
        )
        .unwrap();
        assert_eq!(ts.trades[0].position, -1);
    }

    #[test]
    fn unknown_kind_names_the_token() {
        let err = parse_single("BOGUS|a|b").unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownKind {
                kind: "BOGUS".into()
            }
        );
    }

    #[test]
    fn bad_numeric_field_names_field_and_text() {
        let err = parse_single(
            "TRADE|01/03/2024|abc|100.5|EntryA|01/03/2024|1600|105.25|ExitA|475.00|2|1",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                field: "entry time",
                value: "abc".into()
            }
        );
    }

    #[test]
    fn failed_trade_line_appends_nothing() {
        let mut ts = TradingSystem::new();
        let result = apply_line(
            &mut ts,
            "TRADE|01/03/2024|930|oops|EntryA|01/03/2024|1600|105.25|ExitA|475.00|2|1",
        );
        assert!(result.is_err());
        assert!(ts.trades.is_empty());
    }

    #[test]
    fn trade_with_wrong_field_count_fails() {
        let err = parse_single("TRADE|01/03/2024|930|100.5").unwrap_err();
        assert_eq!(
            err,
            RecordError::FieldCount {
                kind: TRADE,
                expected: 11,
                found: 4
            }
        );
    }

    #[test]
    fn leap_day_encodes_in_range() {
        assert_eq!(convert_date("29/02/2024").unwrap(), 20240229);
    }

    #[test]
    fn year_before_2000_rejected() {
        let err = convert_date("01/01/1999").unwrap_err();
        assert_eq!(
            err,
            RecordError::DateOutOfRange {
                value: "01/01/1999".into()
            }
        );
    }

    #[test]
    fn year_3000_rejected() {
        // 30000101 sits just past the exclusive upper bound.
        assert!(matches!(
            convert_date("01/01/3000"),
            Err(RecordError::DateOutOfRange { .. })
        ));
        assert_eq!(convert_date("31/12/2999").unwrap(), 29991231);
    }

    #[test]
    fn wrong_component_order_rejected() {
        // YYYY/MM/DD reassembles to DDMMYYYY, far below the valid range.
        assert!(matches!(
            convert_date("2024/01/01"),
            Err(RecordError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn unpadded_components_rejected() {
        assert!(matches!(
            convert_date("1/3/2024"),
            Err(RecordError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn two_component_date_is_format_error() {
        assert_eq!(
            convert_date("01/2024").unwrap_err(),
            RecordError::DateFormat {
                value: "01/2024".into()
            }
        );
    }

    #[test]
    fn non_numeric_date_is_format_error() {
        assert!(matches!(
            convert_date("aa/bb/cccc"),
            Err(RecordError::DateFormat { .. })
        ));
    }

    fn format_trade_line(trade: &Trade) -> String {
        let date = |d: i32| format!("{:02}/{:02}/{:04}", d % 100, d / 100 % 100, d / 10_000);
        format!(
            "TRADE|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            date(trade.entry_date),
            trade.entry_time,
            trade.entry_price,
            trade.entry_label,
            date(trade.exit_date),
            trade.exit_time,
            trade.exit_price,
            trade.exit_label,
            trade.gross_profit,
            trade.contracts,
            trade.position,
        )
    }

    proptest! {
        // Parsing, re-serializing the eleven fields and re-parsing must give
        // back field-for-field equal values.
        #[test]
        fn trade_round_trip(
            entry_day in 1i32..=28,
            entry_month in 1i32..=12,
            entry_year in 2000i32..3000,
            entry_time in 0i32..2400,
            entry_price in -10_000.0f64..10_000.0,
            exit_day in 1i32..=28,
            exit_month in 1i32..=12,
            exit_year in 2000i32..3000,
            exit_time in 0i32..2400,
            exit_price in -10_000.0f64..10_000.0,
            gross_profit in -100_000.0f64..100_000.0,
            contracts in 1i32..1000,
            position in -10i32..=10,
            entry_label in "[A-Za-z ]{1,12}",
            exit_label in "[A-Za-z ]{1,12}",
        ) {
            let line = format!(
                "TRADE|{:02}/{:02}/{:04}|{}|{}|{}|{:02}/{:02}/{:04}|{}|{}|{}|{}|{}|{}",
                entry_day, entry_month, entry_year, entry_time, entry_price, entry_label,
                exit_day, exit_month, exit_year, exit_time, exit_price, exit_label,
                gross_profit, contracts, position,
            );

            let first = parse_single(&line).unwrap();
            let reserialized = format_trade_line(&first.trades[0]);
            let second = parse_single(&reserialized).unwrap();

            prop_assert_eq!(&first.trades[0], &second.trades[0]);
        }
    }
}
