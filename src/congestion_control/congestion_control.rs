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

use core::str::FromStr;
use std::fmt;

use crate::Error;
use crate::RecoveryConfig;
use crate::Result;
pub use dummy::Dummy;
pub use monitor_interval::MonitorInterval;
pub use monitor_interval::MonitorIntervalQueue;
pub use monitor_interval::PacketRttSample;
pub use monitor_interval::UtilityInfo;
pub use pcc::Pcc;
pub use pcc::PccConfig;

/// Number of bits per megabit.
pub(crate) const MEGABIT: f64 = (1024 * 1024) as f64;

/// Available congestion control algorithms.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum CongestionControlAlgorithm {
    /// PCC adjusts the sending rate by running rate trials in monitor
    /// intervals and comparing the measured utilities of the trialed rates,
    /// rather than reacting to single loss events.
    #[default]
    Pcc,

    /// Dummy is a simple congestion controller with a static congestion
    /// window. It is intended to be used for testing and experiments.
    Dummy,
}

impl FromStr for CongestionControlAlgorithm {
    type Err = Error;

    fn from_str(algor: &str) -> Result<CongestionControlAlgorithm> {
        if algor.eq_ignore_ascii_case("pcc") {
            Ok(CongestionControlAlgorithm::Pcc)
        } else if algor.eq_ignore_ascii_case("dummy") {
            Ok(CongestionControlAlgorithm::Dummy)
        } else {
            Err(Error::InvalidConfig("unknown".into()))
        }
    }
}

/// Metadata of an acknowledged packet.
#[derive(Debug, Clone, Copy)]
pub struct AckedPacket {
    /// The packet number of the acknowledged packet.
    pub packet_number: i32,

    /// The number of bytes newly acknowledged for the packet.
    pub bytes_acked: u64,
}

/// Metadata of a packet declared lost.
#[derive(Debug, Clone, Copy)]
pub struct LostPacket {
    /// The packet number of the lost packet.
    pub packet_number: i32,

    /// The number of bytes declared lost for the packet.
    pub bytes_lost: u64,
}

/// Congestion control statistics.
#[derive(Debug, Default, Clone)]
pub struct CongestionStats {
    /// Total bytes sent.
    pub bytes_sent_in_total: u64,

    /// Total bytes acked.
    pub bytes_acked_in_total: u64,

    /// Total bytes lost.
    pub bytes_lost_in_total: u64,
}

/// Congestion control interfaces shared by different algorithms.
///
/// All times are in microseconds and all rates are in bits per second. The
/// caller must deliver `on_packet_sent` in packet number order and ack/loss
/// events in arrival order; the controller itself is single threaded and
/// never blocks.
pub trait CongestionController {
    /// Name of congestion control algorithm.
    fn name(&self) -> &str;

    /// Callback after a packet was sent out.
    fn on_packet_sent(
        &mut self,
        sent_time: u64,
        packet_number: i32,
        bytes: u64,
        is_retransmittable: bool,
    );

    /// Callback for processing a batch of acknowledged and lost packets.
    ///
    /// `rtt_us` is the latest rtt sample associated with the event, or zero
    /// when no sample is available. Duplicate acknowledgements must be
    /// deduplicated by the caller.
    fn on_congestion_event(
        &mut self,
        event_time: u64,
        rtt_us: u64,
        acked_packets: &[AckedPacket],
        lost_packets: &[LostPacket],
    );

    /// Current congestion window.
    fn congestion_window(&self) -> u64;

    /// Current pacing rate estimated by Congestion Control Algorithm (CCA).
    /// If CCA does not estimate pacing rate, return None.
    fn pacing_rate(&self) -> Option<u64> {
        None
    }

    /// Congestion stats.
    fn stats(&self) -> &CongestionStats;
}

impl fmt::Debug for dyn CongestionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "congestion controller.")
    }
}

/// Build a congestion controller.
pub fn build_congestion_controller(conf: &RecoveryConfig) -> Box<dyn CongestionController> {
    match conf.congestion_control_algorithm {
        CongestionControlAlgorithm::Pcc => Box::new(Pcc::new(PccConfig::from(conf))),
        CongestionControlAlgorithm::Dummy => Box::new(Dummy::new(
            conf.initial_congestion_window * conf.max_datagram_size as u64,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn congestion_control_name() {
        let cases = [
            ("pcc", Ok(CongestionControlAlgorithm::Pcc)),
            ("Pcc", Ok(CongestionControlAlgorithm::Pcc)),
            ("PCC", Ok(CongestionControlAlgorithm::Pcc)),
            ("dummy", Ok(CongestionControlAlgorithm::Dummy)),
            ("Dummy", Ok(CongestionControlAlgorithm::Dummy)),
            ("DUMMY", Ok(CongestionControlAlgorithm::Dummy)),
            ("pc", Err(Error::InvalidConfig("unknown".into()))),
        ];

        for (name, algor) in cases {
            assert_eq!(CongestionControlAlgorithm::from_str(name), algor);
        }
    }

    #[test]
    fn congestion_control_build_congestion_controller() {
        let mut config = RecoveryConfig::default();

        let cc = build_congestion_controller(&config);
        assert_eq!(cc.name(), "PCC");
        assert!(cc.pacing_rate().is_some());
        assert!(cc.congestion_window() > 0);
        assert_eq!(cc.stats().bytes_sent_in_total, 0);
        assert_eq!(format!("{:?}", cc), "congestion controller.");

        config.congestion_control_algorithm = CongestionControlAlgorithm::Dummy;
        let cc = build_congestion_controller(&config);
        assert_eq!(cc.name(), "DUMMY");
        assert_eq!(
            cc.congestion_window(),
            config.initial_congestion_window * config.max_datagram_size as u64
        );
        assert_eq!(cc.pacing_rate(), None);
    }
}

mod dummy;
mod monitor_interval;
mod pcc;
