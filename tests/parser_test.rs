use chrono::{NaiveDate, NaiveTime};
use mail_corpus_graph::*;

const ENRON_RECORD: &str = "Message-ID: <18782981.1075855378110.JavaMail.evans@thyme>
Date: Mon, 14 May 2001 16:39:00 -0700 (PDT)
From: phillip.allen@enron.com
To: tim.belden@enron.com, john.lavorato@enron.com,\n\tjohn.doe@enron.com
Subject: Re: Forecast
Mime-Version: 1.0
Content-Type: text/plain; charset=us-ascii
Content-Transfer-Encoding: 7bit
X-From: Phillip K Allen
X-To: Tim Belden <Tim Belden/Enron@EnronXGate>
X-cc:
X-bcc:
X-Folder: \\Phillip_Allen_Jan2002_1\\Allen, Phillip K.\\'Sent Mail
X-Origin: Allen-P
X-FileName: pallen (Non-Privileged).pst

Here is our forecast.

 ---------------------- Forwarded by Phillip K Allen/HOU/ECT on 05/14/2001 04:39 PM ---------------------------
Call me at 713-853-3989 (Phone) or visit http://www.enron.com/forecast.html today!!!";

const SHORT_RECORD: &str =
    "Date: Mon, 1 Jan 2001 09:00:00 -0600\nFrom: a@x.com\nSubject: Re: Hi\n\nHello > > World";

// --- parse_record ---

#[test]
fn test_parse_short_record() {
    let record = parse_record(0, SHORT_RECORD);

    assert_eq!(record.index, 0);
    assert_eq!(record.subject(), "Hi");
    assert_eq!(record.body, "Hello World");
    assert_eq!(record.from.addresses, vec!["a@x.com"]);
    assert_eq!(record.from.domains, vec!["x"]);
    assert!(record.to.is_empty());
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2001, 1, 1));
    assert_eq!(record.time, NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(record.header("Message-ID"), "");
    assert_eq!(record.headers.len(), 17);
}

#[test]
fn test_parse_enron_record() {
    let record = parse_record(7, ENRON_RECORD);

    assert_eq!(record.header("Message-ID"), "<18782981.1075855378110.JavaMail.evans@thyme>");
    assert_eq!(record.header("DateTime"), "Mon, 14 May 2001 16:39:00 -0700 (PDT)");
    assert_eq!(record.subject(), "Forecast");
    assert_eq!(record.header("Cc"), "");
    assert_eq!(record.header("Bcc"), "");
    assert_eq!(record.header("X-Origin"), "Allen-P");
    assert_eq!(record.header("X-FileName"), "pallen (Non-Privileged).pst");

    assert_eq!(record.sender(), Some("phillip.allen@enron.com"));
    assert_eq!(
        record.to.addresses,
        vec!["tim.belden@enron.com", "john.lavorato@enron.com", "john.doe@enron.com"]
    );
    assert_eq!(record.from.domains, vec!["enron"]);
    assert_eq!(record.to.domains, vec!["enron"]);
    assert!(record.cc.domains.is_empty());

    assert_eq!(record.body, "Here is our forecast. Call me at or visit today");
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2001, 5, 14));
    assert_eq!(record.time, NaiveTime::from_hms_opt(16, 39, 0));
}

#[test]
fn test_parse_is_deterministic() {
    assert_eq!(parse_record(3, ENRON_RECORD), parse_record(3, ENRON_RECORD));
}

#[test]
fn test_unparseable_date_keeps_record() {
    let record = parse_record(0, "Date: yesterday\nFrom: a@x.com\n\nHi");

    assert_eq!(record.header("DateTime"), "yesterday");
    assert_eq!(record.date, None);
    assert_eq!(record.time, None);
    assert_eq!(record.body, "Hi");
}

#[test]
fn test_mismatched_weekday_still_dated() {
    let batch = parse_batch(["Date: Tue, 14 May 2001 16:39:00 -0700 (PDT)\nFrom: a@x.com\n\nHi"]);

    assert!(batch.failures.is_empty());
    assert_eq!(batch.records[0].date, NaiveDate::from_ymd_opt(2001, 5, 14));
    assert_eq!(batch.records[0].time, NaiveTime::from_hms_opt(16, 39, 0));
}

// --- parse_batch ---

#[test]
fn test_batch_keeps_order_and_failures() {
    let batch = parse_batch([SHORT_RECORD, "Date: yesterday\nFrom: b@y.com\n\nHi", ENRON_RECORD]);

    assert_eq!(batch.records.len(), 3);
    let indices: Vec<usize> = batch.records.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].index, 1);
    assert!(!batch.failures[0].reason.is_empty());

    assert_eq!(batch.bodies(), vec!["Hello World", "Hi", "Here is our forecast. Call me at or visit today"]);
}

#[test]
fn test_empty_batch() {
    let raws: Vec<String> = Vec::new();
    let batch = parse_batch(raws);
    assert!(batch.records.is_empty());
    assert!(batch.failures.is_empty());
}

#[test]
fn test_rows_follow_column_order() {
    let batch = parse_batch([ENRON_RECORD]);
    let json = batch.to_json().unwrap();

    let positions: Vec<usize> = COLUMNS
        .iter()
        .map(|col| json.find(&format!("\"{col}\":")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(json.contains("\"date\":\"2001-05-14\""));
    assert!(json.contains("\"time\":\"16:39:00\""));
    assert!(json.contains("\"From_domain\":[\"enron\"]"));
}

#[test]
fn test_row_values() {
    let row = parse_record(0, SHORT_RECORD).to_row();

    assert_eq!(row.subject, "Hi");
    assert_eq!(row.date_time, "Mon, 1 Jan 2001 09:00:00 -0600");
    assert_eq!(row.from, vec!["a@x.com"]);
    assert!(row.to.is_empty());
    assert_eq!(row.body, "Hello World");
}

// --- Parser with custom configuration ---

#[test]
fn test_custom_schema() {
    let config = PipelineConfig {
        fields: vec!["Date".into(), "From".into(), "Subject".into()],
        ..PipelineConfig::default()
    };
    let parser = Parser::new(config).unwrap();
    let record = parser.parse_record(0, "Date: Mon, 1 Jan 2001 09:00:00 -0600\nSubject: Lunch\n\nSee you");

    assert_eq!(parser.schema().len(), 3);
    assert_eq!(record.headers.len(), 3);
    assert_eq!(record.subject(), "Lunch");
    assert!(record.from.is_empty());
    assert_eq!(record.body, "See you");
    assert!(record.date.is_some());
}

#[test]
fn test_date_suffix_len_is_configurable() {
    let config = PipelineConfig {
        date_suffix_len: 0,
        ..PipelineConfig::default()
    };
    let parser = Parser::new(config).unwrap();
    let batch = parser.parse_batch(["Date: Fri, 4 Feb 2000 23:15:30 +0100\n\nx"]);

    assert!(batch.failures.is_empty());
    assert_eq!(batch.records[0].time, NaiveTime::from_hms_opt(23, 15, 30));
}

#[test]
fn test_raw_replacements_are_configurable() {
    let config = PipelineConfig {
        raw_replacements: Vec::new(),
        ..PipelineConfig::default()
    };
    let parser = Parser::new(config).unwrap();
    let record = parser.parse_record(0, "Subject: Re: Hi");

    assert_eq!(record.subject(), "Re: Hi");
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PipelineConfig {
        fields: Vec::new(),
        ..PipelineConfig::default()
    };
    assert!(matches!(Parser::new(config), Err(CorpusError::InvalidConfig(_))));
}
