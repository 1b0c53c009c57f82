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

//! Auxiliary exception map for `HLL_4` sketches.
//!
//! A 4-bit register can only hold values 0..=14; a slot whose true value
//! would be 15 or more (`EXCEPTION_VALUE` or higher) stores the 4-bit
//! nibble pegged at [`EXCEPTION_NIBBLE`] and keeps its real value here,
//! keyed by register slot number. Open-addressed with double hashing, same
//! shape as the Theta hash table but over 32-bit slot numbers instead of
//! 64-bit hashes.

use crate::error::Error;

/// Nibble value stored in the 4-bit array whenever the true register value
/// has overflowed into the auxiliary map.
pub(crate) const EXCEPTION_NIBBLE: u8 = 15;

const EMPTY_SLOT: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AuxMap {
    slots: Vec<u32>,
    values: Vec<u8>,
    lg_size: u8,
    count: usize,
}

impl AuxMap {
    pub fn new(lg_size: u8) -> Self {
        let size = 1usize << lg_size;
        Self {
            slots: vec![EMPTY_SLOT; size],
            values: vec![0; size],
            lg_size,
            count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    fn mask(&self) -> u32 {
        (self.slots.len() as u32) - 1
    }

    fn stride(&self, slot_no: u32) -> u32 {
        // Odd stride guarantees the probe sequence visits every bucket of a
        // power-of-two table before repeating.
        (slot_no >> self.lg_size) | 1
    }

    /// Probes for `slot_no`: either the index already holding it, or the
    /// index of the first empty slot on its probe path where it belongs.
    ///
    /// Fails with a [`StateError`](crate::error::ErrorKind::StateError) if
    /// the probe cycles all the way back to its start without hitting an
    /// empty slot or `slot_no` itself — a table invariant violation, since a
    /// properly load-factor-bounded table always has empty slots.
    fn find_index(&self, slot_no: u32) -> Result<Result<usize, usize>, Error> {
        let mask = self.mask();
        let start = slot_no & mask;
        let mut index = start;
        let stride = self.stride(slot_no);
        loop {
            match self.slots[index as usize] {
                EMPTY_SLOT => return Ok(Err(index as usize)),
                s if s == slot_no => return Ok(Ok(index as usize)),
                _ => {
                    index = (index + stride) & mask;
                    if index == start {
                        return Err(Error::state_error(
                            "no empty slots: auxiliary map probe cycled without finding slot_no or an empty slot",
                        ));
                    }
                }
            }
        }
    }

    pub fn get(&self, slot_no: u32) -> Option<u8> {
        match self.find_index(slot_no) {
            Ok(Ok(idx)) => Some(self.values[idx]),
            _ => None,
        }
    }

    /// Inserts the value for `slot_no`, growing the table first if it has
    /// crossed its load-factor threshold.
    ///
    /// Fails with a `StateError` if `slot_no` is already present — callers
    /// must use [`must_replace`](Self::must_replace) to update an existing
    /// exception.
    pub fn must_add(&mut self, slot_no: u32, value: u8) -> Result<(), Error> {
        if self.count * 4 >= self.slots.len() * 3 {
            self.grow()?;
        }
        match self.find_index(slot_no)? {
            Ok(_) => Err(Error::state_error(format!(
                "aux map must_add: slot {slot_no} already has an exception entry"
            ))),
            Err(idx) => {
                self.slots[idx] = slot_no;
                self.values[idx] = value;
                self.count += 1;
                Ok(())
            }
        }
    }

    /// Overwrites the value already stored for `slot_no`.
    ///
    /// Fails with a `StateError` if `slot_no` has no exception entry —
    /// callers must use [`must_add`](Self::must_add) to insert a new one.
    pub fn must_replace(&mut self, slot_no: u32, value: u8) -> Result<(), Error> {
        match self.find_index(slot_no)? {
            Ok(idx) => {
                self.values[idx] = value;
                Ok(())
            }
            Err(_) => Err(Error::state_error(format!(
                "aux map must_replace: no exception entry for slot {slot_no}"
            ))),
        }
    }

    /// Looks up the value stored for `slot_no`.
    ///
    /// Fails with a `StateError` if `slot_no` has no exception entry, since
    /// callers only reach here when a register nibble already claims one
    /// exists.
    pub fn must_find_value_for(&self, slot_no: u32) -> Result<u8, Error> {
        match self.find_index(slot_no)? {
            Ok(idx) => Ok(self.values[idx]),
            Err(_) => Err(Error::state_error(format!(
                "aux map must_find_value_for: no exception entry for slot {slot_no}"
            ))),
        }
    }

    /// Removes the exception for `slot_no`, if any.
    pub fn remove(&mut self, slot_no: u32) {
        if let Ok(Ok(idx)) = self.find_index(slot_no) {
            self.slots[idx] = EMPTY_SLOT;
            self.values[idx] = 0;
            self.count -= 1;
            self.rehash_cluster_after_removal(idx);
        }
    }

    /// Re-inserts every entry in the probe cluster following a freed slot,
    /// since open addressing breaks probe chains on naive deletion.
    fn rehash_cluster_after_removal(&mut self, freed: usize) {
        let mask = self.mask();
        let mut index = (freed as u32 + 1) & mask;
        loop {
            let slot_no = self.slots[index as usize];
            if slot_no == EMPTY_SLOT {
                break;
            }
            let value = self.values[index as usize];
            self.slots[index as usize] = EMPTY_SLOT;
            self.values[index as usize] = 0;
            self.count -= 1;
            // Table occupancy is only ever shrinking here, so this cannot
            // grow and the freed slot was just vacated, so the entry being
            // re-homed cannot already be present elsewhere in the table.
            self.must_add(slot_no, value)
                .expect("re-insert during removal rehash cannot fail");
            index = (index + 1) & mask;
        }
    }

    fn grow(&mut self) -> Result<(), Error> {
        let old_slots = std::mem::take(&mut self.slots);
        let old_values = std::mem::take(&mut self.values);
        self.lg_size += 1;
        self.slots = vec![EMPTY_SLOT; 1 << self.lg_size];
        self.values = vec![0; 1 << self.lg_size];
        self.count = 0;
        for (slot_no, value) in old_slots.into_iter().zip(old_values) {
            if slot_no != EMPTY_SLOT {
                self.must_add(slot_no, value)?;
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.slots
            .iter()
            .zip(self.values.iter())
            .filter(|(s, _)| **s != EMPTY_SLOT)
            .map(|(s, v)| (*s, *v))
    }
}
