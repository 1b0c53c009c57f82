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

//! `HLL_8`: one byte per register. Simplest and least compact of the three
//! dense backends, with no curMin bookkeeping or exception map needed since
//! a byte never overflows a realistic register value.

use super::estimator::HipAccumulator;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Array8 {
    registers: Vec<u8>,
    hip: HipAccumulator,
    num_zero: u32,
}

impl Array8 {
    pub fn new(lg_config_k: u8) -> Self {
        let k = 1usize << lg_config_k;
        Self {
            registers: vec![0u8; k],
            hip: HipAccumulator::new(lg_config_k),
            num_zero: k as u32,
        }
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn get(&self, slot: usize) -> u8 {
        self.registers[slot]
    }

    /// Raises the register at `slot` to `value` if it is currently smaller.
    /// Returns `true` if the register actually changed.
    pub fn update_slot(&mut self, slot: usize, value: u8) -> bool {
        let old = self.registers[slot];
        if value <= old {
            return false;
        }
        if old == 0 {
            self.num_zero -= 1;
        }
        self.hip.on_register_raised(old, value);
        self.registers[slot] = value;
        true
    }

    pub fn num_zero_registers(&self) -> u32 {
        self.num_zero
    }

    pub fn estimate(&self, lg_config_k: u8) -> f64 {
        self.hip.estimate(lg_config_k, self.num_zero)
    }

    pub fn set_out_of_order(&mut self, ooo: bool) {
        self.hip.set_out_of_order(ooo);
    }

    pub fn is_out_of_order(&self) -> bool {
        self.hip.is_out_of_order()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.registers
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, v)| (i, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_array_all_zero() {
        let arr = Array8::new(4);
        assert_eq!(arr.num_zero_registers(), 16);
        assert_eq!(arr.estimate(4), 0.0);
    }

    #[test]
    fn update_only_raises_never_lowers() {
        let mut arr = Array8::new(4);
        assert!(arr.update_slot(2, 5));
        assert!(!arr.update_slot(2, 3));
        assert_eq!(arr.get(2), 5);
        assert!(arr.update_slot(2, 7));
        assert_eq!(arr.get(2), 7);
    }

    #[test]
    fn num_zero_tracks_first_touch_per_slot() {
        let mut arr = Array8::new(4);
        arr.update_slot(0, 1);
        assert_eq!(arr.num_zero_registers(), 15);
        arr.update_slot(0, 2);
        assert_eq!(arr.num_zero_registers(), 15);
    }
}
