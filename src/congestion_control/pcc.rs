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

//! PCC: Performance-oriented Congestion Control.
//!
//! PCC evaluates the benefits of different sending rates by comparing their
//! utilities, and adjusts the sending rate towards the direction of higher
//! utility. Rates are trialed in monitor intervals; the utilities of the
//! completed trials drive a state machine that doubles the rate while the
//! utility keeps growing (starting), runs paired probes around a central
//! rate (probing), and then walks the rate along the chosen direction until
//! the utility drops (decision made).
//!
//! See <https://www.usenix.org/conference/nsdi15/technical-sessions/presentation/dong>.

use std::collections::VecDeque;

use log::*;
use rand::Rng;

use super::AckedPacket;
use super::CongestionController;
use super::CongestionStats;
use super::LostPacket;
use super::MonitorIntervalQueue;
use super::UtilityInfo;
use super::MEGABIT;
use crate::RecoveryConfig;

/// Number of bits per byte.
const BITS_PER_BYTE: u64 = 8;

/// Number of microseconds per second.
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// The minimum sending rate in bits per second.
const MIN_SENDING_RATE: f64 = 2.0 * MEGABIT;

/// The smallest amount that the rate can be changed by at a time.
const MIN_RATE_CHANGE: f64 = 0.5 * MEGABIT;

/// Minimum number of packets per monitor interval.
const MIN_PACKETS_PER_INTERVAL: u64 = 10;

/// Step size for rate change in probing mode.
const PROBING_STEP_SIZE: f64 = 0.05;

/// Base step size for rate change in decision made mode.
const DECISION_MADE_STEP_SIZE: f64 = 0.02;

/// Maximum step size for rate change in decision made mode.
const MAX_DECISION_MADE_STEP_SIZE: f64 = 0.10;

/// Groups of useful monitor intervals each time in probing mode.
const NUM_INTERVAL_GROUPS_IN_PROBING: usize = 2;

/// Number of utility gradients to average.
const AVG_GRADIENT_SAMPLE_SIZE: usize = 1;

/// The factor that converts the average utility gradient to a rate change.
const UTILITY_GRADIENT_TO_RATE_CHANGE_FACTOR: f64 = 1.0 * MEGABIT;

/// The initial maximum proportional rate change.
const INITIAL_MAX_PROPORTIONAL_CHANGE: f64 = 0.05;

/// The additional maximum proportional change each time it is incremented.
const PROPORTIONAL_CHANGE_STEP_SIZE: f64 = 0.06;

/// Ignore rtt fluctuation within 30 percent in starting mode.
const RTT_FLUCTUATION_TOLERANCE_IN_STARTING: f64 = 0.3;

/// Ignore rtt fluctuation within 5 percent in decision made mode.
const RTT_FLUCTUATION_TOLERANCE_IN_DECISION_MADE: f64 = 0.05;

/// PCC configurable parameters.
#[derive(Debug)]
pub struct PccConfig {
    /// Initial rtt in microseconds, used before an rtt sample is available.
    initial_rtt_us: u64,

    /// Initial congestion window in packets.
    initial_cwnd: u64,

    /// Maximum congestion window in packets. Reserved.
    max_cwnd: u64,
}

impl PccConfig {
    pub fn new(initial_rtt_us: u64, initial_cwnd: u64, max_cwnd: u64) -> Self {
        Self {
            initial_rtt_us,
            initial_cwnd,
            max_cwnd,
        }
    }
}

impl Default for PccConfig {
    fn default() -> Self {
        PccConfig::from(&RecoveryConfig::default())
    }
}

impl From<&RecoveryConfig> for PccConfig {
    fn from(conf: &RecoveryConfig) -> Self {
        PccConfig::new(
            conf.initial_rtt.as_micros() as u64,
            conf.initial_congestion_window,
            conf.max_congestion_window,
        )
    }
}

/// Sender's mode during a connection.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum SenderMode {
    /// Initial phase of the connection. The sending rate gets doubled as
    /// long as the utility keeps increasing, and the sender enters Probing
    /// mode when it decreases.
    Starting,

    /// The sender tries different sending rates to decide whether a higher
    /// or a lower sending rate has greater utility, and enters DecisionMade
    /// mode once a consistent decision is reached.
    Probing,

    /// The sender keeps increasing or decreasing the sending rate until the
    /// utility decreases, then returns to Probing mode.
    DecisionMade,
}

/// Indicates whether the sender should increase or decrease the sending
/// rate.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum RateChangeDirection {
    Increase,
    Decrease,
}

/// PCC: Performance-oriented Congestion Control.
///
/// See <https://www.usenix.org/conference/nsdi15/technical-sessions/presentation/dong>.
#[derive(Debug)]
pub struct Pcc {
    /// Config.
    config: PccConfig,

    /// Statistics.
    stats: CongestionStats,

    /// Current mode of the sender.
    mode: SenderMode,

    /// Sending rate for the next monitor intervals, in bits per second.
    sending_rate: f64,

    /// Most recent utility used when making the last rate change decision.
    latest_utility_info: UtilityInfo,

    /// Duration of the current monitor interval in microseconds.
    monitor_duration: u64,

    /// Current direction of rate changes.
    direction: RateChangeDirection,

    /// Number of rounds the sender remains in the current mode.
    rounds: usize,

    /// Queue of monitor intervals with pending utilities.
    interval_queue: MonitorIntervalQueue,

    /// The current average of several utility gradients.
    avg_gradient: f64,

    /// The gradient samples that have been averaged.
    gradient_samples: VecDeque<f64>,

    /// Smoothed rtt in microseconds, zero until the first sample.
    avg_rtt_us: u64,

    /// The number of consecutive rate changes in a single direction before
    /// the rate of change is accelerated again.
    swing_buffer: usize,

    /// An acceleration factor for the rate of change.
    rate_change_amplifier: f64,

    /// The maximum rate change as a proportion of the current rate.
    rate_change_proportion_allowance: usize,

    /// The most recent change made to the sending rate.
    previous_change: f64,
}

impl Pcc {
    pub fn new(config: PccConfig) -> Self {
        // The initial rate fills the provisioned congestion window once per
        // initial rtt.
        let sending_rate = (config.initial_cwnd * crate::DEFAULT_MSS * BITS_PER_BYTE) as f64
            * MICROS_PER_SECOND
            / config.initial_rtt_us as f64;

        trace!(
            "PCC init: sending_rate={}bps initial_rtt={}us max_cwnd={}pkts",
            sending_rate,
            config.initial_rtt_us,
            config.max_cwnd
        );

        Self {
            config,
            stats: Default::default(),
            mode: SenderMode::Starting,
            sending_rate,
            latest_utility_info: UtilityInfo::default(),
            monitor_duration: 0,
            direction: RateChangeDirection::Increase,
            rounds: 1,
            interval_queue: MonitorIntervalQueue::new(),
            avg_gradient: 0.0,
            gradient_samples: VecDeque::new(),
            avg_rtt_us: 0,
            swing_buffer: 0,
            rate_change_amplifier: 0.0,
            rate_change_proportion_allowance: 0,
            previous_change: 0.0,
        }
    }

    /// Called by the interval queue when all useful intervals' utilities
    /// are available, so the sender can make a rate decision.
    fn on_utility_available(&mut self, utility_info: &[UtilityInfo]) {
        match self.mode {
            SenderMode::Starting => {
                if utility_info[0].utility > self.latest_utility_info.utility {
                    // Stay in Starting mode. Double the sending rate and
                    // update the latest utility.
                    self.sending_rate *= 2.0;
                    self.latest_utility_info = utility_info[0];
                    self.rounds += 1;

                    trace!(
                        "{} starting rate doubled: sending_rate={}bps round={}",
                        self.name(),
                        self.sending_rate,
                        self.rounds
                    );
                } else {
                    // Enter Probing mode if the utility decreases.
                    self.enter_probing();
                }
            }
            SenderMode::Probing => {
                if self.can_make_decision(utility_info) {
                    // Enter DecisionMade mode if a decision is made.
                    self.direction = if utility_info[0].utility > utility_info[1].utility {
                        if utility_info[0].sending_rate > utility_info[1].sending_rate {
                            RateChangeDirection::Increase
                        } else {
                            RateChangeDirection::Decrease
                        }
                    } else if utility_info[0].sending_rate > utility_info[1].sending_rate {
                        RateChangeDirection::Decrease
                    } else {
                        RateChangeDirection::Increase
                    };

                    self.latest_utility_info = if utility_info
                        [2 * NUM_INTERVAL_GROUPS_IN_PROBING - 2]
                        .utility
                        > utility_info[2 * NUM_INTERVAL_GROUPS_IN_PROBING - 1].utility
                    {
                        utility_info[2 * NUM_INTERVAL_GROUPS_IN_PROBING - 2]
                    } else {
                        utility_info[2 * NUM_INTERVAL_GROUPS_IN_PROBING - 1]
                    };

                    let mut rate_change =
                        self.compute_rate_change(utility_info[0], utility_info[1]);
                    if self.sending_rate + rate_change < MIN_SENDING_RATE {
                        rate_change = MIN_SENDING_RATE - self.sending_rate;
                    }
                    self.previous_change = rate_change;
                    self.enter_decision_made(self.sending_rate + rate_change);
                } else {
                    // Stays in Probing mode.
                    self.enter_probing();
                }
            }
            SenderMode::DecisionMade => {
                let mut rate_change =
                    self.compute_rate_change(utility_info[0], self.latest_utility_info);
                if self.sending_rate + rate_change < MIN_SENDING_RATE {
                    rate_change = MIN_SENDING_RATE - self.sending_rate;
                }

                if (rate_change > 0.0) == (self.previous_change > 0.0) {
                    // Remain in DecisionMade mode. Keep increasing or
                    // decreasing the sending rate.
                    self.previous_change = rate_change;
                    self.sending_rate += rate_change;
                    self.latest_utility_info = utility_info[0];

                    trace!(
                        "{} decision made step: sending_rate={}bps change={}bps",
                        self.name(),
                        self.sending_rate,
                        rate_change
                    );
                } else {
                    // Enter Probing if the old rate change is no longer
                    // best.
                    self.enter_probing();
                }
            }
        }
    }

    /// Computes the rate change for the next monitor intervals from the
    /// utility gradient of two samples.
    fn compute_rate_change(
        &mut self,
        utility_sample_1: UtilityInfo,
        utility_sample_2: UtilityInfo,
    ) -> f64 {
        if utility_sample_1.sending_rate == utility_sample_2.sending_rate {
            return MIN_RATE_CHANGE;
        }

        let utility_gradient = MEGABIT * (utility_sample_1.utility - utility_sample_2.utility)
            / (utility_sample_1.sending_rate - utility_sample_2.sending_rate);
        self.update_average_gradient(utility_gradient);
        let mut change = self.avg_gradient * UTILITY_GRADIENT_TO_RATE_CHANGE_FACTOR;

        if (change > 0.0) != (self.previous_change > 0.0) {
            self.rate_change_amplifier = 0.0;
            self.rate_change_proportion_allowance = 0;
            if self.swing_buffer < 2 {
                self.swing_buffer += 1;
            }
        }

        if self.rate_change_amplifier < 3.0 {
            change *= self.rate_change_amplifier + 1.0;
        } else if self.rate_change_amplifier < 6.0 {
            change *= 2.0 * self.rate_change_amplifier - 2.0;
        } else if self.rate_change_amplifier < 9.0 {
            change *= 4.0 * self.rate_change_amplifier - 14.0;
        } else {
            change *= 9.0 * self.rate_change_amplifier - 50.0;
        }

        if (change > 0.0) == (self.previous_change > 0.0) {
            if self.swing_buffer == 0 {
                if self.rate_change_amplifier < 3.0 {
                    self.rate_change_amplifier += 0.5;
                } else {
                    self.rate_change_amplifier += 1.0;
                }
            }
            if self.swing_buffer > 0 {
                self.swing_buffer -= 1;
            }
        }

        let max_allowed_change_ratio = INITIAL_MAX_PROPORTIONAL_CHANGE
            + self.rate_change_proportion_allowance as f64 * PROPORTIONAL_CHANGE_STEP_SIZE;
        let change_ratio = (change / self.sending_rate).abs();

        if change_ratio > max_allowed_change_ratio {
            self.rate_change_proportion_allowance += 1;
            change = if change < 0.0 {
                -max_allowed_change_ratio * self.sending_rate
            } else {
                max_allowed_change_ratio * self.sending_rate
            };
        } else if self.rate_change_proportion_allowance > 0 {
            self.rate_change_proportion_allowance -= 1;
        }

        if (change > 0.0) != (self.previous_change > 0.0) {
            self.rate_change_amplifier = 0.0;
            self.rate_change_proportion_allowance = 0;
        }

        if change < 0.0 && change > -MIN_RATE_CHANGE {
            change = -MIN_RATE_CHANGE;
        } else if change > 0.0 && change < MIN_RATE_CHANGE {
            change = MIN_RATE_CHANGE;
        }

        trace!(
            "{} rate change: gradient={} avg_gradient={} change={}bps amplifier={} \
             allowance={} swing_buffer={}",
            self.name(),
            utility_gradient,
            self.avg_gradient,
            change,
            self.rate_change_amplifier,
            self.rate_change_proportion_allowance,
            self.swing_buffer
        );

        change
    }

    /// Folds a new gradient into the running average over the sample
    /// window.
    fn update_average_gradient(&mut self, new_gradient: f64) {
        if self.gradient_samples.is_empty() {
            self.avg_gradient = new_gradient;
        } else if self.gradient_samples.len() < AVG_GRADIENT_SAMPLE_SIZE {
            self.avg_gradient *= self.gradient_samples.len() as f64;
            self.avg_gradient += new_gradient;
            self.avg_gradient /= (self.gradient_samples.len() + 1) as f64;
        } else if let Some(oldest_gradient) = self.gradient_samples.pop_front() {
            self.avg_gradient -= oldest_gradient / AVG_GRADIENT_SAMPLE_SIZE as f64;
            self.avg_gradient += new_gradient / AVG_GRADIENT_SAMPLE_SIZE as f64;
        }
        self.gradient_samples.push_back(new_gradient);
    }

    /// Returns true if the next created monitor interval is useful, i.e.
    /// its utility will be used when a decision can be made.
    fn create_useful_interval(&self) -> bool {
        if self.avg_rtt_us == 0 {
            // Create non useful intervals upon starting a connection, until
            // there are valid rtt stats.
            return false;
        }

        // In Starting and DecisionMade mode there is at most one useful
        // interval in the queue; Probing trials two groups of paired
        // probes.
        let max_num_useful = if self.mode == SenderMode::Probing {
            2 * NUM_INTERVAL_GROUPS_IN_PROBING
        } else {
            1
        };
        self.interval_queue.num_useful_intervals() < max_num_useful
    }

    /// Maybe set the sending rate for the next created monitor interval.
    fn maybe_set_sending_rate(&mut self) {
        if self.mode != SenderMode::Probing
            || (self.interval_queue.num_useful_intervals() == 2 * NUM_INTERVAL_GROUPS_IN_PROBING
                && !self
                    .interval_queue
                    .current()
                    .map_or(false, |interval| interval.is_useful))
        {
            // Do not change the sending rate when (1) the current mode is
            // Starting or DecisionMade (the rate is set in
            // on_utility_available), or (2) all the probing intervals have
            // been created.
            return;
        }

        if self.interval_queue.num_useful_intervals() != 0 {
            // Restore the central sending rate.
            match self.direction {
                RateChangeDirection::Increase => {
                    self.sending_rate *= 1.0 / (1.0 + PROBING_STEP_SIZE)
                }
                RateChangeDirection::Decrease => {
                    self.sending_rate *= 1.0 / (1.0 - PROBING_STEP_SIZE)
                }
            }

            if self.interval_queue.num_useful_intervals() == 2 * NUM_INTERVAL_GROUPS_IN_PROBING {
                // This is the first not useful monitor interval; it rides
                // the central rate.
                return;
            }
        }

        // The sender creates several groups of monitor intervals. Each
        // group comprises an interval with increased sending rate and an
        // interval with decreased sending rate. Which interval goes first
        // is randomly decided.
        self.direction = if self.interval_queue.num_useful_intervals() % 2 == 0 {
            if rand::thread_rng().gen_range(0..2) == 1 {
                RateChangeDirection::Increase
            } else {
                RateChangeDirection::Decrease
            }
        } else {
            match self.direction {
                RateChangeDirection::Increase => RateChangeDirection::Decrease,
                RateChangeDirection::Decrease => RateChangeDirection::Increase,
            }
        };

        match self.direction {
            RateChangeDirection::Increase => self.sending_rate *= 1.0 + PROBING_STEP_SIZE,
            RateChangeDirection::Decrease => self.sending_rate *= 1.0 - PROBING_STEP_SIZE,
        }

        trace!(
            "{} probe: direction={:?} sending_rate={}bps",
            self.name(),
            self.direction,
            self.sending_rate
        );
    }

    /// Returns true if the sender can enter DecisionMade from Probing mode.
    fn can_make_decision(&self, utility_info: &[UtilityInfo]) -> bool {
        // A decision needs 2 * NUM_INTERVAL_GROUPS_IN_PROBING utilities.
        // Fewer arrive when the sender does not have enough data to send.
        if utility_info.len() < 2 * NUM_INTERVAL_GROUPS_IN_PROBING {
            return false;
        }

        let mut increase = false;
        // All the probing groups must reach the same decision.
        for i in 0..NUM_INTERVAL_GROUPS_IN_PROBING {
            let increase_i = if utility_info[2 * i].utility > utility_info[2 * i + 1].utility {
                utility_info[2 * i].sending_rate > utility_info[2 * i + 1].sending_rate
            } else {
                utility_info[2 * i].sending_rate < utility_info[2 * i + 1].sending_rate
            };

            if i == 0 {
                increase = increase_i;
            }
            if increase_i != increase {
                return false;
            }
        }

        true
    }

    /// Set the sending rate to the central rate used in Probing mode.
    fn enter_probing(&mut self) {
        match self.mode {
            SenderMode::Starting => {
                // Use half the current rate as the central probing rate.
                self.sending_rate *= 0.5;
            }
            SenderMode::DecisionMade => {
                // Use the sending rate right before the utility decreased
                // as the central probing rate.
                let step = (self.rounds as f64 * DECISION_MADE_STEP_SIZE)
                    .min(MAX_DECISION_MADE_STEP_SIZE);
                match self.direction {
                    RateChangeDirection::Increase => self.sending_rate *= 1.0 / (1.0 + step),
                    RateChangeDirection::Decrease => self.sending_rate *= 1.0 / (1.0 - step),
                }
            }
            SenderMode::Probing => {
                // After a batch the queue keeps only intervals enqueued at
                // the central rate; an empty queue means the last probe
                // perturbation is still applied to the sending rate.
                if self.interval_queue.is_empty() {
                    match self.direction {
                        RateChangeDirection::Increase => {
                            self.sending_rate *= 1.0 / (1.0 + PROBING_STEP_SIZE)
                        }
                        RateChangeDirection::Decrease => {
                            self.sending_rate *= 1.0 / (1.0 - PROBING_STEP_SIZE)
                        }
                    }
                }
            }
        }

        if self.mode == SenderMode::Probing {
            self.rounds += 1;
            return;
        }

        trace!(
            "{} enter probing: mode={:?} sending_rate={}bps",
            self.name(),
            self.mode,
            self.sending_rate
        );

        self.mode = SenderMode::Probing;
        self.rounds = 1;
    }

    /// Set the sending rate when entering DecisionMade from Probing mode.
    fn enter_decision_made(&mut self, new_rate: f64) {
        trace!(
            "{} enter decision made: sending_rate={}bps direction={:?}",
            self.name(),
            new_rate,
            self.direction
        );

        self.sending_rate = new_rate;
        self.mode = SenderMode::DecisionMade;
        self.rounds = 1;
    }
}

/// Returns the duration of a monitor interval: 1.5 smoothed rtts, floored
/// by the time needed to send a minimum number of packets at the given
/// rate.
fn compute_monitor_duration(sending_rate: f64, rtt_us: u64) -> u64 {
    (1.5 * rtt_us as f64)
        .max((MIN_PACKETS_PER_INTERVAL * BITS_PER_BYTE * crate::DEFAULT_MSS) as f64 / sending_rate)
        as u64
}

impl CongestionController for Pcc {
    fn name(&self) -> &str {
        "PCC"
    }

    fn on_packet_sent(
        &mut self,
        sent_time: u64,
        packet_number: i32,
        bytes: u64,
        _is_retransmittable: bool,
    ) {
        self.stats.bytes_sent_in_total = self.stats.bytes_sent_in_total.saturating_add(bytes);

        // Start a new monitor interval when there is no useful interval in
        // the queue, or once the current interval has been running for a
        // full monitor duration.
        let start_new_interval = self.interval_queue.num_useful_intervals() == 0
            || self.interval_queue.current().map_or(false, |interval| {
                self.avg_rtt_us != 0
                    && sent_time.saturating_sub(interval.first_packet_sent_time)
                        > self.monitor_duration
            });

        if start_new_interval {
            self.maybe_set_sending_rate();
            self.monitor_duration = compute_monitor_duration(self.sending_rate, self.avg_rtt_us);

            // No rtt fluctuation tolerance during Probing.
            let rtt_fluctuation_tolerance_ratio = match self.mode {
                // Use a larger tolerance at start to boost the sending rate.
                SenderMode::Starting => RTT_FLUCTUATION_TOLERANCE_IN_STARTING,
                SenderMode::DecisionMade => RTT_FLUCTUATION_TOLERANCE_IN_DECISION_MADE,
                SenderMode::Probing => 0.0,
            };

            let is_useful = self.create_useful_interval();
            self.interval_queue.enqueue_new_monitor_interval(
                self.sending_rate,
                is_useful,
                rtt_fluctuation_tolerance_ratio,
                self.avg_rtt_us,
                sent_time + self.monitor_duration,
            );
        }

        self.interval_queue
            .on_packet_sent(sent_time, packet_number, bytes);
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

        if rtt_us != 0 {
            if self.avg_rtt_us == 0 {
                self.avg_rtt_us = rtt_us;
            } else {
                self.avg_rtt_us = (self.avg_rtt_us * 3 + rtt_us) / 4;
            }

            if self.mode == SenderMode::Starting {
                if let Some(interval) = self.interval_queue.current() {
                    if interval.rtt_on_monitor_start_us != 0
                        && rtt_us
                            > ((1.0 + RTT_FLUCTUATION_TOLERANCE_IN_STARTING)
                                * interval.rtt_on_monitor_start_us as f64)
                                as u64
                    {
                        // Directly enter Probing when the rtt inflation
                        // already exceeds the tolerance ratio, to reduce
                        // packet losses and mitigate the inflation.
                        trace!(
                            "{} rtt inflation in starting: rtt={}us start_rtt={}us",
                            self.name(),
                            rtt_us,
                            interval.rtt_on_monitor_start_us
                        );

                        self.interval_queue.on_rtt_inflation_in_starting();
                        self.enter_probing();
                        return;
                    }
                }
            }
        }

        if let Some(utility_info) =
            self.interval_queue
                .on_congestion_event(acked_packets, lost_packets, rtt_us, event_time)
        {
            self.on_utility_available(&utility_info);
        }
    }

    fn congestion_window(&self) -> u64 {
        // Use the smoothed rtt to calculate the expected congestion window,
        // except when it is still zero at the start of a connection.
        let rtt_us = if self.avg_rtt_us == 0 {
            self.config.initial_rtt_us
        } else {
            self.avg_rtt_us
        };
        (self.sending_rate * rtt_us as f64 / MICROS_PER_SECOND) as u64
    }

    fn pacing_rate(&self) -> Option<u64> {
        let rate = self
            .interval_queue
            .current()
            .map_or(self.sending_rate, |interval| interval.sending_rate);
        Some(rate as u64)
    }

    fn stats(&self) -> &CongestionStats {
        &self.stats
    }
}
