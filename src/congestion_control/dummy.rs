// Copyright (c) 2024 The PCC Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(unused_variables)]

use super::AckedPacket;
use super::CongestionController;
use super::CongestionStats;
use super::LostPacket;

/// Dummy is a simple congestion controller with a static congestion window.
/// It is intended to be used for testing and experiments.
#[derive(Debug)]
pub struct Dummy {
    /// Congestion window in bytes.
    cwnd: u64,

    /// Congestion statistics.
    stats: CongestionStats,
}

impl Dummy {
    pub fn new(initial_cwnd: u64) -> Self {
        Self {
            cwnd: initial_cwnd,
            stats: Default::default(),
        }
    }
}

impl CongestionController for Dummy {
    fn name(&self) -> &str {
        "DUMMY"
    }

    fn on_packet_sent(
        &mut self,
        sent_time: u64,
        packet_number: i32,
        bytes: u64,
        is_retransmittable: bool,
    ) {
        self.stats.bytes_sent_in_total = self.stats.bytes_sent_in_total.saturating_add(bytes);
    }

    fn on_congestion_event(
        &mut self,
        event_time: u64,
        rtt_us: u64,
        acked_packets: &[AckedPacket],
        lost_packets: &[LostPacket],
    ) {
        for acked_packet in acked_packets {
            self.stats.bytes_acked_in_total = self
                .stats
                .bytes_acked_in_total
                .saturating_add(acked_packet.bytes_acked);
        }
        for lost_packet in lost_packets {
            self.stats.bytes_lost_in_total = self
                .stats
                .bytes_lost_in_total
                .saturating_add(lost_packet.bytes_lost);
        }
    }

    fn congestion_window(&self) -> u64 {
        self.cwnd
    }

    fn pacing_rate(&self) -> Option<u64> {
        None
    }

    fn stats(&self) -> &CongestionStats {
        &self.stats
    }
}
