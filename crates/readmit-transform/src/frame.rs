//! Export of the merged table as a Polars DataFrame.
//!
//! Column names follow the source tables' naming; the two derived columns
//! use fixed names. Timestamps are rendered back in the configured format so
//! the output reads the same way the input did.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use readmit_model::{MergedRecord, PipelineOptions};

use crate::datetime::format_timestamp;

pub const DAYS_NEXT_ADMIT_COLUMN: &str = "DAYS_NEXT_ADMIT";
pub const NEXT_ADMIT_TIME_COLUMN: &str = "NEXT_ADMITTIME";

fn timestamp_column(
    name: &str,
    records: &[MergedRecord],
    format: &str,
    get: impl Fn(&MergedRecord) -> Option<chrono::NaiveDateTime>,
) -> Column {
    let values: Vec<Option<String>> = records
        .iter()
        .map(|record| get(record).map(|value| format_timestamp(value, format)))
        .collect();
    Series::new(name.into(), values).into_column()
}

/// Build a DataFrame with one row per merged record.
pub fn merged_to_dataframe(
    records: &[MergedRecord],
    options: &PipelineOptions,
) -> PolarsResult<DataFrame> {
    let columns = &options.admission_columns;
    let format = options.timestamp_format.as_str();

    let subject: Vec<i64> = records.iter().map(|r| r.subject_id.get()).collect();
    let admission: Vec<i64> = records.iter().map(|r| r.admission_id.get()).collect();
    let days: Vec<Option<f64>> = records.iter().map(|r| r.days_to_next_admit).collect();
    let admission_type: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.admission_type.as_deref())
        .collect();
    let text: Vec<Option<&str>> = records.iter().map(|r| r.text.as_deref()).collect();

    DataFrame::new(vec![
        Series::new(columns.subject_id.as_str().into(), subject).into_column(),
        Series::new(columns.admission_id.as_str().into(), admission).into_column(),
        timestamp_column(&columns.admit_time, records, format, |r| r.admit_time),
        timestamp_column(&columns.discharge_time, records, format, |r| {
            r.discharge_time
        }),
        Series::new(DAYS_NEXT_ADMIT_COLUMN.into(), days).into_column(),
        timestamp_column(NEXT_ADMIT_TIME_COLUMN, records, format, |r| {
            r.next_admit_time
        }),
        Series::new(columns.admission_type.as_str().into(), admission_type).into_column(),
        timestamp_column(&columns.death_time, records, format, |r| r.death_time),
        Series::new(options.note_columns.text.as_str().into(), text).into_column(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::AnyValue;
    use readmit_model::{AdmissionId, SubjectId};

    #[test]
    fn frame_has_fixed_projection() {
        let admit = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let records = vec![MergedRecord {
            subject_id: SubjectId::new(1),
            admission_id: AdmissionId::new(10),
            admit_time: Some(admit),
            discharge_time: None,
            days_to_next_admit: Some(15.0),
            next_admit_time: None,
            admission_type: Some("EMERGENCY".to_string()),
            death_time: None,
            text: None,
        }];

        let df = merged_to_dataframe(&records, &PipelineOptions::default()).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SUBJECT_ID",
                "HADM_ID",
                "ADMITTIME",
                "DISCHTIME",
                "DAYS_NEXT_ADMIT",
                "NEXT_ADMITTIME",
                "ADMISSION_TYPE",
                "DEATHTIME",
                "TEXT",
            ]
        );
        assert_eq!(df.height(), 1);
        assert_eq!(
            df.column("ADMITTIME").unwrap().get(0).unwrap(),
            AnyValue::String("2100-01-01 08:30:00")
        );
        assert_eq!(
            df.column("DAYS_NEXT_ADMIT").unwrap().get(0).unwrap(),
            AnyValue::Float64(15.0)
        );
        assert_eq!(df.column("TEXT").unwrap().null_count(), 1);
    }
}
