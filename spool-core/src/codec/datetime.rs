// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Date/time codecs. All members of the date-time family share one wire
//! payload, epoch microseconds as `i64`, so family-routed values stay
//! decodable under the canonical binding. `NaiveDate` is day-granular and
//! stays outside the family.

use std::any::Any;
use std::mem;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::buffer::{Reader, Writer};
use crate::codec::Codec;
use crate::error::Error;

fn micros_to_utc(micros: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::microseconds(micros)
}

impl Codec for DateTime<Utc> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_i64(self.timestamp_micros());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok(micros_to_utc(reader.read_i64()?))
    }

    fn reserved_space() -> usize {
        mem::size_of::<i64>()
    }
}

impl Codec for DateTime<Local> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_i64(self.timestamp_micros());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok(micros_to_utc(reader.read_i64()?).with_timezone(&Local))
    }

    fn reserved_space() -> usize {
        mem::size_of::<i64>()
    }
}

impl Codec for NaiveDateTime {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_i64(self.and_utc().timestamp_micros());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok(micros_to_utc(reader.read_i64()?).naive_utc())
    }

    fn reserved_space() -> usize {
        mem::size_of::<i64>()
    }
}

impl Codec for NaiveDate {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.date_naive();
        let days = self.signed_duration_since(epoch).num_days();
        writer.write_i32(days as i32);
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let days = reader.read_i32()?;
        let epoch = DateTime::<Utc>::UNIX_EPOCH.date_naive();
        Ok(epoch + TimeDelta::days(days as i64))
    }

    fn reserved_space() -> usize {
        mem::size_of::<i32>()
    }
}

/// Family write half: normalizes any date-time family member to epoch
/// microseconds. Used by the dynamic path when a member has no exact
/// binding of its own.
pub(crate) fn write_any_datetime(value: &dyn Any, writer: &mut Writer) -> Result<(), Error> {
    let micros = if let Some(dt) = value.downcast_ref::<DateTime<Utc>>() {
        dt.timestamp_micros()
    } else if let Some(dt) = value.downcast_ref::<DateTime<Local>>() {
        dt.timestamp_micros()
    } else if let Some(dt) = value.downcast_ref::<NaiveDateTime>() {
        dt.and_utc().timestamp_micros()
    } else {
        return Err(Error::encoding_error(
            "value is not a date-time family member",
        ));
    };
    writer.write_i64(micros);
    Ok(())
}
