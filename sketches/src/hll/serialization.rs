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

//! Byte layout shared by [`HllSketch`](super::sketch::HllSketch)'s
//! `serialize`/`deserialize`.
//!
//! Every sketch starts with a fixed 8-byte preamble: preamble length (in
//! longs, always 1 for this format), serial version, family ID, `lgConfigK`,
//! a packed mode/type byte, a flags byte, and a little-endian `u16` seed
//! hash. The mode-specific body follows.

use crate::codec::{Family, SketchBytes, SketchSlice};
use crate::error::Error;

use super::{Mode, TgtHllType};

pub(crate) const SERIAL_VERSION: u8 = 1;
pub(crate) const PREAMBLE_BYTES: usize = 8;

pub(crate) fn write_preamble(
    out: &mut SketchBytes,
    lg_config_k: u8,
    tgt_type: TgtHllType,
    mode: Mode,
    seed_hash: u16,
) {
    out.write_u8(1); // preamble length, in longs
    out.write_u8(SERIAL_VERSION);
    out.write_u8(Family::HLL.id);
    out.write_u8(lg_config_k);
    out.write_u8((mode.to_tag() << 4) | tgt_type.to_tag());
    out.write_u8(0); // flags, reserved
    out.write_u16_le(seed_hash);
}

pub(crate) struct Preamble {
    pub lg_config_k: u8,
    pub tgt_type: TgtHllType,
    pub mode: Mode,
    pub seed_hash: u16,
}

pub(crate) fn read_preamble(input: &mut SketchSlice) -> Result<Preamble, Error> {
    let _preamble_longs = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("preamble length", e))?;
    let serial_version = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("serial version", e))?;
    if serial_version != SERIAL_VERSION {
        return Err(Error::unsupported_serial_version(
            SERIAL_VERSION,
            serial_version,
        ));
    }
    let family_id = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("family id", e))?;
    Family::HLL.validate_id(family_id)?;
    let lg_config_k = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("lgConfigK", e))?;
    let mode_and_type = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("mode/type byte", e))?;
    let mode = Mode::from_tag(mode_and_type >> 4)?;
    let tgt_type = TgtHllType::from_tag(mode_and_type & 0x0f)?;
    let _flags = input
        .read_u8()
        .map_err(|e| Error::insufficient_data_of("flags", e))?;
    let seed_hash = input
        .read_u16_le()
        .map_err(|e| Error::insufficient_data_of("seed hash", e))?;
    Ok(Preamble {
        lg_config_k,
        tgt_type,
        mode,
        seed_hash,
    })
}

pub(crate) fn write_coupons(out: &mut SketchBytes, coupons: &[u32]) {
    out.write_u32_le(coupons.len() as u32);
    for c in coupons {
        out.write_u32_le(*c);
    }
}

pub(crate) fn read_coupons(input: &mut SketchSlice) -> Result<Vec<u32>, Error> {
    let count = input
        .read_u32_le()
        .map_err(|e| Error::insufficient_data_of("coupon count", e))? as usize;
    let mut coupons = Vec::with_capacity(count);
    for _ in 0..count {
        coupons.push(
            input
                .read_u32_le()
                .map_err(|e| Error::insufficient_data_of("coupon", e))?,
        );
    }
    Ok(coupons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_round_trips() {
        let mut out = SketchBytes::new();
        write_preamble(&mut out, 12, TgtHllType::Hll4, Mode::Hll, 0xabcd);
        let bytes = out.into_bytes();
        assert_eq!(bytes.len(), PREAMBLE_BYTES);
        let mut input = SketchSlice::new(&bytes);
        let preamble = read_preamble(&mut input).unwrap();
        assert_eq!(preamble.lg_config_k, 12);
        assert_eq!(preamble.tgt_type, TgtHllType::Hll4);
        assert_eq!(preamble.mode, Mode::Hll);
        assert_eq!(preamble.seed_hash, 0xabcd);
    }

    #[test]
    fn coupons_round_trip() {
        let mut out = SketchBytes::new();
        write_coupons(&mut out, &[1, 2, 3, u32::MAX]);
        let bytes = out.into_bytes();
        let mut input = SketchSlice::new(&bytes);
        assert_eq!(read_coupons(&mut input).unwrap(), vec![1, 2, 3, u32::MAX]);
    }

    #[test]
    fn wrong_family_id_is_rejected() {
        let mut out = SketchBytes::new();
        out.write_u8(1);
        out.write_u8(SERIAL_VERSION);
        out.write_u8(Family::THETA.id);
        out.write_u8(12);
        out.write_u8(0);
        out.write_u8(0);
        out.write_u16_le(0);
        let bytes = out.into_bytes();
        let mut input = SketchSlice::new(&bytes);
        assert!(read_preamble(&mut input).is_err());
    }
}
