//! CSV row decoding
//!
//! [`StoreRows`] pulls one record at a time from the underlying reader and
//! maps it onto a [`StoreRecord`] through the header names uploaders use.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use shared::models::StoreRecord;
use shared::util::lenient_f64;

use super::IngestError;

/// Header position of every column the store table knows about
#[derive(Debug, Default, Clone)]
struct ColumnMap {
    name: Option<usize>,
    display_name: Option<usize>,
    address: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    fax: Option<usize>,
    email: Option<usize>,
    sun_facing_amt: Option<usize>,
    optical_facing_amt: Option<usize>,
    phone_number: Option<usize>,
    monday_time: Option<usize>,
    tuesday_time: Option<usize>,
    wednesday_time: Option<usize>,
    thursday_time: Option<usize>,
    friday_time: Option<usize>,
    saturday_time: Option<usize>,
    sunday_time: Option<usize>,
}

impl ColumnMap {
    /// Header names are matched exactly; `Address` keeps its capital A.
    fn resolve(headers: &StringRecord) -> Self {
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == column)
        };

        Self {
            name: position("name"),
            display_name: position("display_name"),
            address: position("Address"),
            latitude: position("latitude"),
            longitude: position("longitude"),
            fax: position("fax"),
            email: position("email"),
            sun_facing_amt: position("sun_facing_amt"),
            optical_facing_amt: position("optical_facing_amt"),
            phone_number: position("phone_number"),
            monday_time: position("monday_time"),
            tuesday_time: position("tuesday_time"),
            wednesday_time: position("wednesday_time"),
            thursday_time: position("thursday_time"),
            friday_time: position("friday_time"),
            saturday_time: position("saturday_time"),
            sunday_time: position("sunday_time"),
        }
    }

    fn map(&self, record: &StringRecord) -> Result<StoreRecord, IngestError> {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i));
        let text = |idx: Option<usize>| field(idx).map(str::to_owned);

        let name = text(self.name).ok_or(IngestError::MissingColumn("name"))?;

        Ok(StoreRecord {
            name,
            display_name: text(self.display_name),
            address: text(self.address),
            latitude: lenient_f64(field(self.latitude)),
            longitude: lenient_f64(field(self.longitude)),
            fax: text(self.fax),
            email: text(self.email),
            sun_facing_amt: text(self.sun_facing_amt),
            optical_facing_amt: text(self.optical_facing_amt),
            phone_number: text(self.phone_number),
            monday_time: text(self.monday_time),
            tuesday_time: text(self.tuesday_time),
            wednesday_time: text(self.wednesday_time),
            thursday_time: text(self.thursday_time),
            friday_time: text(self.friday_time),
            saturday_time: text(self.saturday_time),
            sunday_time: text(self.sunday_time),
        })
    }
}

/// Lazy, single-pass sequence of store records
///
/// Ends after the last record or after the first error.
pub struct StoreRows<R> {
    reader: csv::Reader<R>,
    columns: ColumnMap,
    record: StringRecord,
    done: bool,
}

impl<R: Read> StoreRows<R> {
    pub fn from_reader(input: R) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let columns = ColumnMap::resolve(reader.headers()?);

        Ok(Self {
            reader,
            columns,
            record: StringRecord::new(),
            done: false,
        })
    }
}

impl<R: Read> Iterator for StoreRows<R> {
    type Item = Result<StoreRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = match self.reader.read_record(&mut self.record) {
            Ok(true) => self.columns.map(&self.record),
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e.into()),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

/// Decode every row, stopping at the first error
pub fn parse_stores<R: Read>(input: R) -> Result<Vec<StoreRecord>, IngestError> {
    StoreRows::from_reader(input)?.collect()
}
