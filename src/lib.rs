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

//! PCC is an implementation of the Performance-oriented Congestion Control
//! algorithm. Instead of reacting to individual loss events, a PCC sender
//! runs rate trials in consecutive monitor intervals, scores each trial with
//! a utility function combining throughput, loss and rtt inflation, and
//! moves the sending rate towards the direction of higher utility.
//!
//! The crate provides:
//!
//! * [`CongestionController`]: the interface shared by the congestion
//!   control algorithms. The transport reports sent packets and ack/loss
//!   events, and reads back a pacing rate and a congestion window. The
//!   controller performs no I/O of its own.
//! * [`Pcc`]: the PCC rate controller, built around a three mode state
//!   machine (starting, probing, decision made) and a queue of monitor
//!   intervals with pending utilities.
//! * [`Dummy`]: a controller with a static congestion window, intended for
//!   testing and experiments.

use std::time::Duration;

/// Default TCP maximum segment size in bytes.
pub(crate) const DEFAULT_MSS: u64 = 1400;

/// The default initial rtt, used before a real rtt is estimated.
const INITIAL_RTT: Duration = Duration::from_millis(333);

/// A specialized `Result` type for congestion control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configurations about congestion control and provisioning.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// The congestion control algorithm used for a path.
    pub congestion_control_algorithm: CongestionControlAlgorithm,

    /// The maximum size of outgoing UDP payloads.
    pub max_datagram_size: usize,

    /// The initial congestion window in packets.
    pub initial_congestion_window: u64,

    /// The maximum congestion window in packets.
    pub max_congestion_window: u64,

    /// The initial rtt, used before real rtt is estimated.
    pub initial_rtt: Duration,
}

impl Default for RecoveryConfig {
    fn default() -> RecoveryConfig {
        RecoveryConfig {
            congestion_control_algorithm: CongestionControlAlgorithm::Pcc,
            max_datagram_size: DEFAULT_MSS as usize,
            initial_congestion_window: 10,
            max_congestion_window: 10_000,
            initial_rtt: INITIAL_RTT,
        }
    }
}

pub use crate::congestion_control::build_congestion_controller;
pub use crate::congestion_control::AckedPacket;
pub use crate::congestion_control::CongestionControlAlgorithm;
pub use crate::congestion_control::CongestionController;
pub use crate::congestion_control::CongestionStats;
pub use crate::congestion_control::Dummy;
pub use crate::congestion_control::LostPacket;
pub use crate::congestion_control::MonitorInterval;
pub use crate::congestion_control::MonitorIntervalQueue;
pub use crate::congestion_control::PacketRttSample;
pub use crate::congestion_control::Pcc;
pub use crate::congestion_control::PccConfig;
pub use crate::congestion_control::UtilityInfo;
pub use crate::error::Error;

#[path = "congestion_control/congestion_control.rs"]
pub mod congestion_control;

pub mod error;
