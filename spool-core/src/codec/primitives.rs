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

use std::mem;

use crate::buffer::{Reader, Writer};
use crate::codec::Codec;
use crate::error::Error;
use crate::registry::TypeDescriptor;

macro_rules! impl_fixed_codec {
    ($ty:ty, $write:ident, $read:ident) => {
        impl Codec for $ty {
            #[inline(always)]
            fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
                writer.$write(*self);
                Ok(())
            }

            #[inline(always)]
            fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
                reader.$read()
            }

            fn reserved_space() -> usize {
                mem::size_of::<$ty>()
            }
        }
    };
}

impl_fixed_codec!(i8, write_i8, read_i8);
impl_fixed_codec!(i16, write_i16, read_i16);
impl_fixed_codec!(u8, write_u8, read_u8);
impl_fixed_codec!(u16, write_u16, read_u16);
impl_fixed_codec!(f32, write_f32, read_f32);
impl_fixed_codec!(f64, write_f64, read_f64);

macro_rules! impl_var_codec {
    ($ty:ty, $write:ident, $read:ident) => {
        impl Codec for $ty {
            #[inline(always)]
            fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
                writer.$write(*self);
                Ok(())
            }

            #[inline(always)]
            fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
                reader.$read()
            }

            fn reserved_space() -> usize {
                mem::size_of::<$ty>() + 1
            }
        }
    };
}

impl_var_codec!(i32, write_varint32, read_varint32);
impl_var_codec!(i64, write_varint64, read_varint64);
impl_var_codec!(u32, write_varuint32, read_varuint32);
impl_var_codec!(u64, write_varuint64, read_varuint64);

impl Codec for bool {
    #[inline(always)]
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_u8(*self as u8);
        Ok(())
    }

    #[inline(always)]
    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_data(format!(
                "invalid bool byte: {}",
                other
            ))),
        }
    }

    fn reserved_space() -> usize {
        1
    }
}

impl Codec for String {
    #[inline(always)]
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_str(self);
        Ok(())
    }

    #[inline(always)]
    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        reader.read_str()
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

/// Scalars and `String`, in the fixed order the builder assigns their wire
/// ids. These are always registered, ahead of the codec table.
pub(crate) fn primordial_descriptors() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::of::<bool>(),
        TypeDescriptor::of::<i8>(),
        TypeDescriptor::of::<i16>(),
        TypeDescriptor::of::<i32>(),
        TypeDescriptor::of::<i64>(),
        TypeDescriptor::of::<f32>(),
        TypeDescriptor::of::<f64>(),
        TypeDescriptor::of::<u8>(),
        TypeDescriptor::of::<u16>(),
        TypeDescriptor::of::<u32>(),
        TypeDescriptor::of::<u64>(),
        TypeDescriptor::of::<String>(),
    ]
}
