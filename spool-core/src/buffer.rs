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

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::Error;

/// Growable little-endian write buffer. One `Writer` lives inside each
/// engine instance and is reset (capacity kept) between messages.
#[derive(Default)]
pub struct Writer {
    bf: Vec<u8>,
    reserved: usize,
}

impl Writer {
    pub fn reset(&mut self) {
        // keep capacity, drop content
        self.bf.clear();
        self.reserved = 0;
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.reserved += additional;
        if self.bf.capacity() < self.reserved {
            self.bf.reserve(self.reserved);
        }
    }

    pub fn write_bytes(&mut self, v: &[u8]) {
        self.bf.extend_from_slice(v);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bf.write_u16::<LittleEndian>(value).unwrap();
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bf.write_i16::<LittleEndian>(value).unwrap();
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bf.write_u32::<LittleEndian>(value).unwrap();
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bf.write_i32::<LittleEndian>(value).unwrap();
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bf.write_u64::<LittleEndian>(value).unwrap();
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bf.write_i64::<LittleEndian>(value).unwrap();
    }

    pub fn write_f32(&mut self, value: f32) {
        self.bf.write_f32::<LittleEndian>(value).unwrap();
    }

    pub fn write_f64(&mut self, value: f64) {
        self.bf.write_f64::<LittleEndian>(value).unwrap();
    }

    pub fn write_varuint32(&mut self, value: u32) {
        let mut v = value;
        while v >= 0x80 {
            self.bf.push((v as u8 & 0x7F) | 0x80);
            v >>= 7;
        }
        self.bf.push(v as u8);
    }

    pub fn write_varint32(&mut self, value: i32) {
        let zigzag = ((value << 1) ^ (value >> 31)) as u32;
        self.write_varuint32(zigzag);
    }

    pub fn write_varuint64(&mut self, value: u64) {
        let mut v = value;
        while v >= 0x80 {
            self.bf.push((v as u8 & 0x7F) | 0x80);
            v >>= 7;
        }
        self.bf.push(v as u8);
    }

    pub fn write_varint64(&mut self, value: i64) {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self.write_varuint64(zigzag);
    }

    /// Length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str) {
        self.write_varuint32(s.len() as u32);
        self.bf.extend_from_slice(s.as_bytes());
    }
}

/// Bounds-checked read cursor over a borrowed byte slice. Every read fails
/// with [`Error::BufferOutOfBound`] instead of walking past the input.
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    pub fn slice_after_cursor(&self) -> &'a [u8] {
        &self.bf[self.cursor..]
    }

    #[inline]
    fn check(&self, len: usize) -> Result<(), Error> {
        if self.cursor + len > self.bf.len() {
            return Err(Error::buffer_out_of_bound(self.cursor, len, self.bf.len()));
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.check(len)?;
        let s = &self.bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(s)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check(1)?;
        let v = self.bf[self.cursor];
        self.cursor += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let mut result = 0u32;
        let mut shift = 0;
        loop {
            let b = self.read_u8()?;
            result |= ((b & 0x7F) as u32) << shift;
            if b < 0x80 {
                return Ok(result);
            }
            shift += 7;
            if shift >= 35 {
                return Err(Error::invalid_data("varuint32 longer than 5 bytes"));
            }
        }
    }

    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        let encoded = self.read_varuint32()?;
        Ok(((encoded >> 1) as i32) ^ -((encoded & 1) as i32))
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        let mut result = 0u64;
        let mut shift = 0;
        loop {
            let b = self.read_u8()?;
            result |= ((b & 0x7F) as u64) << shift;
            if b < 0x80 {
                return Ok(result);
            }
            shift += 7;
            if shift >= 70 {
                return Err(Error::invalid_data("varuint64 longer than 10 bytes"));
            }
        }
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let encoded = self.read_varuint64()?;
        Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
    }

    /// Counterpart of [`Writer::write_str`].
    pub fn read_str(&mut self) -> Result<String, Error> {
        let len = self.read_varuint32()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::encoding_error("string payload is not valid UTF-8"))
    }
}
