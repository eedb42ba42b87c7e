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

//! Codecs for the standard value types whose generic encoding would be
//! wrong or oversized: big numbers, UUID, URL, compiled regex, bit sets.

use std::mem;

use bigdecimal::BigDecimal;
use bit_set::BitSet;
use num_bigint::BigInt;
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::buffer::{Reader, Writer};
use crate::codec::Codec;
use crate::error::Error;

impl Codec for BigInt {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        let bytes = self.to_signed_bytes_le();
        writer.write_varuint32(bytes.len() as u32);
        writer.write_bytes(&bytes);
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let len = reader.read_varuint32()? as usize;
        Ok(BigInt::from_signed_bytes_le(reader.read_bytes(len)?))
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl Codec for BigDecimal {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        // unscaled integer plus decimal scale, the usual arbitrary-precision
        // decimal wire form
        let (unscaled, scale) = self.as_bigint_and_exponent();
        writer.write_varint64(scale);
        unscaled.encode_data(writer)
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let scale = reader.read_varint64()?;
        let unscaled = BigInt::decode_data(reader)?;
        Ok(BigDecimal::new(unscaled, scale))
    }

    fn reserved_space() -> usize {
        mem::size_of::<u64>()
    }
}

impl Codec for Uuid {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_bytes(self.as_bytes());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let bytes = reader.read_bytes(16)?;
        Uuid::from_slice(bytes).map_err(|_| Error::invalid_data("malformed uuid payload"))
    }

    fn reserved_space() -> usize {
        16
    }
}

impl Codec for Url {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_str(self.as_str());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let s = reader.read_str()?;
        Url::parse(&s).map_err(|e| Error::encoding_error(format!("invalid url: {}", e)))
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

// A compiled regex travels as its pattern source and is recompiled on
// decode; the compiled program itself is not a stable wire artifact.
impl Codec for Regex {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_str(self.as_str());
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let pattern = reader.read_str()?;
        Regex::new(&pattern)
            .map_err(|e| Error::encoding_error(format!("invalid regex pattern: {}", e)))
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

// Set-member indexes rather than raw blocks: block dumps drag capacity
// padding along and break set equality after a round trip.
impl Codec for BitSet {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_varuint32(self.len() as u32);
        for idx in self.iter() {
            writer.write_varuint32(idx as u32);
        }
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let len = reader.read_varuint32()? as usize;
        let mut result = BitSet::new();
        for _ in 0..len {
            result.insert(reader.read_varuint32()? as usize);
        }
        Ok(result)
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}
