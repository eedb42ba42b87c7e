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

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::mem;

use crate::buffer::{Reader, Writer};
use crate::codec::Codec;
use crate::error::Error;

fn write_seq<'a, T: Codec + 'a>(
    items: impl ExactSizeIterator<Item = &'a T>,
    writer: &mut Writer,
) -> Result<(), Error> {
    writer.write_varuint32(items.len() as u32);
    for item in items {
        item.encode_data(writer)?;
    }
    Ok(())
}

macro_rules! impl_seq_codec {
    ($ty:ident $(, $extra_bound:path)?) => {
        impl<T: Codec $(+ $extra_bound)?> Codec for $ty<T> {
            fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
                write_seq(self.iter(), writer)
            }

            fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
                let len = reader.read_varuint32()? as usize;
                let mut result = <$ty<T>>::default();
                for _ in 0..len {
                    result.extend([T::decode_data(reader)?]);
                }
                Ok(result)
            }

            fn reserved_space() -> usize {
                mem::size_of::<u32>()
            }
        }
    };
}

impl_seq_codec!(Vec);
impl_seq_codec!(VecDeque);
impl_seq_codec!(LinkedList);
impl_seq_codec!(BTreeSet, Ord);

impl<T: Codec + Eq + Hash> Codec for HashSet<T> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        write_seq(self.iter(), writer)
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let len = reader.read_varuint32()? as usize;
        let mut result = HashSet::with_capacity(len);
        for _ in 0..len {
            result.insert(T::decode_data(reader)?);
        }
        Ok(result)
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl<K: Codec + Eq + Hash, V: Codec> Codec for HashMap<K, V> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_varuint32(self.len() as u32);
        for (key, value) in self {
            key.encode_data(writer)?;
            value.encode_data(writer)?;
        }
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let len = reader.read_varuint32()? as usize;
        let mut result = HashMap::with_capacity(len);
        for _ in 0..len {
            let key = K::decode_data(reader)?;
            let value = V::decode_data(reader)?;
            result.insert(key, value);
        }
        Ok(result)
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl<K: Codec + Ord, V: Codec> Codec for BTreeMap<K, V> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.write_varuint32(self.len() as u32);
        for (key, value) in self {
            key.encode_data(writer)?;
            value.encode_data(writer)?;
        }
        Ok(())
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        let len = reader.read_varuint32()? as usize;
        let mut result = BTreeMap::new();
        for _ in 0..len {
            let key = K::decode_data(reader)?;
            let value = V::decode_data(reader)?;
            result.insert(key, value);
        }
        Ok(result)
    }

    fn reserved_space() -> usize {
        mem::size_of::<u32>()
    }
}

impl<T: Codec> Codec for Option<T> {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        match self {
            Some(value) => {
                writer.write_u8(1);
                value.encode_data(writer)
            }
            None => {
                writer.write_u8(0);
                Ok(())
            }
        }
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode_data(reader)?)),
            other => Err(Error::invalid_data(format!(
                "invalid option tag: {}",
                other
            ))),
        }
    }

    fn reserved_space() -> usize {
        1 + T::reserved_space()
    }
}

impl<A: Codec, B: Codec> Codec for (A, B) {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        self.0.encode_data(writer)?;
        self.1.encode_data(writer)
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok((A::decode_data(reader)?, B::decode_data(reader)?))
    }

    fn reserved_space() -> usize {
        A::reserved_space() + B::reserved_space()
    }
}

impl<A: Codec, B: Codec, C: Codec> Codec for (A, B, C) {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        self.0.encode_data(writer)?;
        self.1.encode_data(writer)?;
        self.2.encode_data(writer)
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok((
            A::decode_data(reader)?,
            B::decode_data(reader)?,
            C::decode_data(reader)?,
        ))
    }

    fn reserved_space() -> usize {
        A::reserved_space() + B::reserved_space() + C::reserved_space()
    }
}
