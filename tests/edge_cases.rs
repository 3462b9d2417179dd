//! Edge case tests for the chat export grammar and the response-time rules

use chatstat::ChatstatError;
use chatstat::core::Summary;
use chatstat::parser::ChatParser;
use chrono::{NaiveDate, TimeDelta};

fn parse(content: &str) -> Result<Vec<chatstat::MessageRecord>, ChatstatError> {
    ChatParser::new().parse_str(content)
}

// =========================================================================
// Input shape
// =========================================================================

#[test]
fn test_empty_input() {
    let records = parse("").unwrap();
    assert!(records.is_empty());

    let summary = Summary::compute(&records);
    assert!(summary.is_empty());
    assert_eq!(summary.distinct_days, 0);
    assert!(summary.ratios.is_empty());
}

#[test]
fn test_only_blank_lines() {
    assert!(parse("\n\n\r\n").unwrap().is_empty());
}

#[test]
fn test_byte_order_mark() {
    let records = parse("\u{feff}[01.01.23, 10:00:00] Alice: Hi\n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sender, "Alice");
}

#[test]
fn test_bare_carriage_return_ends_a_line() {
    let records = parse("[01.01.23, 10:00:00] Alice: Hi\r[01.01.23, 10:05:00] Bob: Hello").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].body, "Hi");
    assert_eq!(records[1].sender, "Bob");
    assert_eq!(records[1].response_time, Some(TimeDelta::minutes(5)));
}

#[test]
fn test_crlf_line_endings() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Hi\r\n\
         [01.01.23, 10:01:00] Bob: Hello\r\n",
    )
    .unwrap();
    assert_eq!(records[0].body, "Hi");
    assert_eq!(records[1].body, "Hello");
}

#[test]
fn test_missing_trailing_newline() {
    let records = parse("[01.01.23, 10:00:00] Alice: Hi").unwrap();
    assert_eq!(records.len(), 1);
}

// =========================================================================
// Line grammar
// =========================================================================

#[test]
fn test_colon_in_body() {
    let records = parse("[01.01.23, 10:00:00] Alice: time: 10:30, place: here\n").unwrap();
    assert_eq!(records[0].sender, "Alice");
    assert_eq!(records[0].body, "time: 10:30, place: here");
}

#[test]
fn test_sender_with_spaces_and_unicode() {
    let records = parse(
        "[01.01.23, 10:00:00] Иван Петров: Привет\n\
         [01.01.23, 10:00:30] 🔥 Fire User: 🔥\n",
    )
    .unwrap();
    assert_eq!(records[0].sender, "Иван Петров");
    assert_eq!(records[1].sender, "🔥 Fire User");
    assert_eq!(records[1].response_time, Some(TimeDelta::seconds(30)));
}

#[test]
fn test_prefix_without_space_is_continuation() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Hi\n\
         [01.01.23, 10:01:00] Bob:no space\n",
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].sender, "Alice");
    assert_eq!(records[1].body, "[01.01.23, 10:01:00] Bob:no space");
}

#[test]
fn test_whitespace_body_is_kept() {
    let records = parse("[01.01.23, 10:00:00] Alice:    \n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].body, "   ");
}

#[test]
fn test_header_with_empty_body_does_not_carry() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Hi\n\
         [01.01.23, 11:00:00] Bob: \n\
         more\n",
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].sender, "Alice");
    assert_eq!(
        records[1].timestamp,
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_invalid_date_is_parse_error() {
    let err = parse(
        "[01.01.23, 10:00:00] Alice: Hi\n\
         [32.01.23, 10:00:00] Bob: Hello\n",
    )
    .unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.line_number(), Some(2));
    assert!(err.to_string().contains("32.01.23"));
}

#[test]
fn test_invalid_time_is_parse_error() {
    let err = parse("[01.01.23, 25:00:00] Alice: Hi\n").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.line_number(), Some(1));
}

#[test]
fn test_continuation_before_first_header() {
    let err = parse("orphan\n[01.01.23, 10:00:00] Alice: Hi\n").unwrap_err();
    assert!(err.is_input_format());
    assert_eq!(err.line_number(), Some(1));
}

#[test]
fn test_leading_blank_lines_are_fine() {
    let records = parse("\n\n[01.01.23, 10:00:00] Alice: Hi\n").unwrap();
    assert_eq!(records[0].line_number, 3);
}

// =========================================================================
// Response times
// =========================================================================

#[test]
fn test_threshold_is_inclusive() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Hi\n\
         [01.01.23, 16:00:00] Bob: exactly six hours\n\
         [01.01.23, 22:00:01] Alice: one second too late\n",
    )
    .unwrap();
    assert_eq!(records[1].response_time, Some(TimeDelta::hours(6)));
    assert_eq!(records[2].response_time, None);
}

#[test]
fn test_zero_timelimit_keeps_simultaneous_answers() {
    let records = ChatParser::new()
        .with_response_timelimit(TimeDelta::zero())
        .parse_str(
            "[01.01.23, 10:00:00] Alice: Hi\n\
             [01.01.23, 10:00:00] Bob: instant\n\
             [01.01.23, 10:00:01] Alice: slow\n",
        )
        .unwrap();
    assert_eq!(records[1].response_time, Some(TimeDelta::zero()));
    assert_eq!(records[2].response_time, None);
}

#[test]
fn test_continuation_from_other_sender_is_not_a_switch() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Hi\n\
         [01.01.23, 10:02:00] Bob: Hello\n\
         second line\n\
         [01.01.23, 10:03:00] Bob: again\n",
    )
    .unwrap();
    let with_rt: Vec<_> = records.iter().filter(|r| r.response_time.is_some()).collect();
    assert_eq!(with_rt.len(), 1);
    assert_eq!(with_rt[0].line_number, 2);
}

#[test]
fn test_timestamps_going_backwards() {
    let err = parse(
        "[02.01.23, 10:00:00] Alice: Hi\n\
         [01.01.23, 10:00:00] Bob: from the past\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ChatstatError::NegativeResponseTime {
            line: 2,
            gap_seconds: 86400
        }
    ));
}

#[test]
fn test_daylight_saving_fall_back_names_the_line() {
    // Local clock jumps from 02:59 back to 02:00
    let err = parse(
        "[29.10.23, 02:50:00] Alice: still up\n\
         [29.10.23, 02:05:00] Bob: me too\n",
    )
    .unwrap_err();
    assert_eq!(err.line_number(), Some(2));
    let message = err.to_string();
    assert!(message.contains("2700s earlier"));
    assert!(message.contains("correct the timestamp on this line"));
}

#[test]
fn test_backwards_within_one_block_is_allowed() {
    // Only switch points are compared
    let records = parse(
        "[01.01.23, 10:05:00] Alice: Hi\n\
         [01.01.23, 10:00:00] Alice: earlier\n\
         [01.01.23, 10:10:00] Bob: Hello\n",
    )
    .unwrap();
    assert_eq!(records[2].response_time, Some(TimeDelta::minutes(5)));
}

#[test]
fn test_single_sender_has_no_responses() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: one\n\
         [01.01.23, 10:01:00] Alice: two\n",
    )
    .unwrap();
    let summary = Summary::compute(&records);
    assert_eq!(summary.senders[0].average_response_time, None);
    assert!(summary.ratios.is_empty());
}

// =========================================================================
// Statistics
// =========================================================================

#[test]
fn test_message_length_counts_chars() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: Привет\n\
         [01.01.23, 10:01:00] Alice: 🔥🔥\n",
    )
    .unwrap();
    let summary = Summary::compute(&records);
    // (6 + 2) / 2
    assert_eq!(summary.senders[0].average_message_length, 4);
}

#[test]
fn test_message_length_rounds_half_to_even() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: ab\n\
         [01.01.23, 10:01:00] Alice: abc\n\
         [01.01.23, 10:02:00] Bob: abc\n\
         [01.01.23, 10:03:00] Bob: abcd\n",
    )
    .unwrap();
    let summary = Summary::compute(&records);
    // 2.5 -> 2, 3.5 -> 4
    assert_eq!(summary.sender("Alice").unwrap().average_message_length, 2);
    assert_eq!(summary.sender("Bob").unwrap().average_message_length, 4);
}

#[test]
fn test_messages_per_day_uses_whole_chat_days() {
    let records = parse(
        "[01.01.23, 10:00:00] Alice: a\n\
         [02.01.23, 10:00:00] Alice: b\n\
         [03.01.23, 10:00:00] Bob: c\n\
         [04.01.23, 10:00:00] Alice: d\n",
    )
    .unwrap();
    let summary = Summary::compute(&records);
    assert_eq!(summary.distinct_days, 4);
    assert_eq!(summary.sender("Alice").unwrap().average_messages_per_day, 0.75);
    assert_eq!(summary.sender("Bob").unwrap().average_messages_per_day, 0.25);
    assert_eq!(summary.ratios[0].ratio, 3.0);
}
