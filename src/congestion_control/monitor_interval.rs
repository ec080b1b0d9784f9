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

//! A queue of PCC monitor intervals.
//!
//! Each monitor interval records the packets sent while one trial sending
//! rate was in effect. The queue attributes acked and lost packets to the
//! intervals that sent them, computes the utility of an interval once all
//! of its packets are accounted for, and hands back a batch of utilities
//! when every useful interval in the queue has one.

use std::collections::VecDeque;

use log::*;

use super::AckedPacket;
use super::LostPacket;
use super::MEGABIT;

/// Tolerance of loss rate by the utility function.
const LOSS_RATE_TOLERANCE: f64 = 0.03;

/// Coefficient of the loss term for loss rates within the tolerance.
const LOSS_COEFFICIENT_LOW: f64 = 1.0;

/// Coefficient of the loss term for loss rates above the tolerance.
const LOSS_COEFFICIENT_HIGH: f64 = 11.35;

/// Coefficient of the latency term in the utility function.
const LATENCY_COEFFICIENT: f64 = 1.0;

/// Coefficient of the rtt inflation penalty in the utility function.
const RTT_COEFFICIENT: f64 = 11330.0;

/// Alpha factor in the utility function.
const UTILITY_ALPHA: f64 = 1.0;

/// An exponent in the utility function.
const UTILITY_EXPONENT: f64 = 0.9;

/// The smallest accountable interval transmission time in microseconds.
const MIN_TRANSMISSION_TIME: u64 = 1;

/// Number of microseconds per second.
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// The packet number and the rtt sample observed when it was acked.
#[derive(Debug, Clone, Copy)]
pub struct PacketRttSample {
    /// Packet number of the sampled packet.
    pub packet_number: i32,

    /// Rtt sample in microseconds.
    pub sample_rtt: u64,
}

impl PacketRttSample {
    fn new(packet_number: i32, rtt_us: u64) -> Self {
        Self {
            packet_number,
            sample_rtt: rtt_us,
        }
    }
}

/// MonitorInterval stores the information of a PCC monitor interval, used to
/// pinpoint an acked/lost packet to the interval that sent it and to
/// calculate the interval's utility value.
#[derive(Debug)]
pub struct MonitorInterval {
    /// Trial sending rate of the interval in bits per second.
    pub sending_rate: f64,

    /// True if the interval's utility feeds a rate decision.
    pub is_useful: bool,

    /// The tolerable rtt fluctuation ratio.
    pub rtt_fluctuation_tolerance_ratio: f64,

    /// The end time of the interval in microseconds.
    pub end_time: u64,

    /// Sent time of the first packet.
    pub first_packet_sent_time: u64,

    /// Sent time of the last packet.
    pub last_packet_sent_time: u64,

    /// Packet number of the first sent packet.
    pub first_packet_number: i32,

    /// Packet number of the last sent packet.
    pub last_packet_number: i32,

    /// Number of bytes which are sent in total.
    pub bytes_sent: u64,

    /// Number of bytes which have been acked.
    pub bytes_acked: u64,

    /// Number of bytes which are considered as lost.
    pub bytes_lost: u64,

    /// Smoothed rtt when the interval starts.
    pub rtt_on_monitor_start_us: u64,

    /// Rtt when all sent packets are either acked or lost.
    pub rtt_on_monitor_end_us: u64,

    /// Utility value of the interval, calculated once all sent packets are
    /// either acked or lost.
    pub utility: f64,

    /// The number of packets sent in the interval.
    pub n_packets: u64,

    /// A sample of the rtt for each acked packet, in arrival order.
    pub packet_rtt_samples: Vec<PacketRttSample>,
}

impl MonitorInterval {
    pub fn new(
        sending_rate: f64,
        is_useful: bool,
        rtt_fluctuation_tolerance_ratio: f64,
        rtt_us: u64,
        end_time: u64,
    ) -> Self {
        Self {
            sending_rate,
            is_useful,
            rtt_fluctuation_tolerance_ratio,
            end_time,
            first_packet_sent_time: 0,
            last_packet_sent_time: 0,
            first_packet_number: 0,
            last_packet_number: 0,
            bytes_sent: 0,
            bytes_acked: 0,
            bytes_lost: 0,
            rtt_on_monitor_start_us: rtt_us,
            rtt_on_monitor_end_us: rtt_us,
            utility: 0.0,
            n_packets: 0,
            packet_rtt_samples: Vec::new(),
        }
    }

    /// Returns true when all the interval's packets are either acked or
    /// lost and the interval has run to its end time.
    fn is_utility_available(&self, event_time: u64) -> bool {
        event_time >= self.end_time && self.bytes_acked + self.bytes_lost == self.bytes_sent
    }

    /// Returns true if `packet_number` belongs to the interval.
    fn contains_packet(&self, packet_number: i32) -> bool {
        packet_number >= self.first_packet_number && packet_number <= self.last_packet_number
    }

    /// Calculates the utility of the interval. Returns false if the interval
    /// has no valid utility, i.e. it contains a single packet.
    fn calculate_utility(&mut self) -> bool {
        if self.last_packet_sent_time == self.first_packet_sent_time {
            // Cannot get valid utility if the interval only contains one
            // packet.
            return false;
        }

        let mi_duration = std::cmp::max(
            MIN_TRANSMISSION_TIME,
            self.last_packet_sent_time - self.first_packet_sent_time,
        );
        let mi_time_seconds = mi_duration as f64 / MICROS_PER_SECOND;

        let bytes_lost = self.bytes_lost as f64;
        let bytes_sent = self.bytes_sent as f64;

        let sending_rate_bps = bytes_sent * 8.0 / mi_time_seconds;
        let sending_factor = UTILITY_ALPHA * (sending_rate_bps / MEGABIT).powf(UTILITY_EXPONENT);

        // Split the rtt samples in half and compare the sums to estimate how
        // much the rtt inflated while the interval was in flight. The middle
        // sample is ignored when the count is odd.
        let half_samples = self.packet_rtt_samples.len() / 2;
        let mut rtt_first_half_sum = 0.0;
        let mut rtt_second_half_sum = 0.0;
        for i in 0..half_samples {
            rtt_first_half_sum += self.packet_rtt_samples[i].sample_rtt as f64;
            rtt_second_half_sum += self.packet_rtt_samples[i + half_samples].sample_rtt as f64;
        }
        let latency_inflation =
            2.0 * (rtt_second_half_sum - rtt_first_half_sum) / (rtt_first_half_sum + rtt_second_half_sum);

        // Two stage integer truncation, rounding the inflation down to the
        // nearest 0.02. Downstream decisions hinge on these discrete steps,
        // so the casts must truncate toward zero.
        let rtt_penalty =
            ((((latency_inflation * 100.0) as i64) as f64 / 100.0 * 100.0) as i64 / 2 * 2) as f64
                / 100.0;
        let rtt_contribution = LATENCY_COEFFICIENT * RTT_COEFFICIENT * bytes_sent * rtt_penalty;

        let loss_rate = bytes_lost / bytes_sent;
        let loss_coefficient = if loss_rate <= LOSS_RATE_TOLERANCE {
            LOSS_COEFFICIENT_LOW
        } else {
            LOSS_COEFFICIENT_HIGH
        };
        let loss_contribution = self.n_packets as f64 * (loss_coefficient * ((1.0 + loss_rate) - 1.0));

        let current_utility = sending_factor
            - (loss_contribution + rtt_contribution) * (sending_rate_bps / MEGABIT)
                / self.n_packets as f64;

        trace!(
            "utility calculation: utility={} n_packets={} target_rate={}bps actual_rate={}bps \
             latency_inflation={} rtt_contribution={} loss_rate={} loss_contribution={}",
            current_utility,
            self.n_packets,
            self.sending_rate,
            sending_rate_bps,
            latency_inflation,
            rtt_contribution,
            loss_rate,
            loss_contribution
        );

        self.utility = current_utility;
        true
    }
}

/// UtilityInfo is used to store `(sending_rate, utility)` pairs.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UtilityInfo {
    /// Trial sending rate in bits per second.
    pub sending_rate: f64,

    /// Utility of the trial.
    pub utility: f64,
}

impl UtilityInfo {
    pub fn new(sending_rate: f64, utility: f64) -> Self {
        Self {
            sending_rate,
            utility,
        }
    }
}

/// MonitorIntervalQueue contains a queue of MonitorIntervals.
///
/// New MonitorIntervals are added to the tail of the queue. Existing
/// MonitorIntervals are removed from the queue when all useful intervals'
/// utilities are available.
#[derive(Debug, Default)]
pub struct MonitorIntervalQueue {
    /// The monitor intervals, oldest at the head.
    monitor_intervals: VecDeque<MonitorInterval>,

    /// Number of useful intervals in the queue.
    num_useful_intervals: usize,

    /// Number of useful intervals in the queue with available utilities.
    num_available_intervals: usize,
}

impl MonitorIntervalQueue {
    pub fn new() -> Self {
        MonitorIntervalQueue::default()
    }

    /// Creates a new MonitorInterval and adds it to the tail of the queue.
    pub fn enqueue_new_monitor_interval(
        &mut self,
        sending_rate: f64,
        is_useful: bool,
        rtt_fluctuation_tolerance_ratio: f64,
        rtt_us: u64,
        end_time: u64,
    ) {
        if is_useful {
            self.num_useful_intervals += 1;
        }

        self.monitor_intervals.push_back(MonitorInterval::new(
            sending_rate,
            is_useful,
            rtt_fluctuation_tolerance_ratio,
            rtt_us,
            end_time,
        ));
    }

    /// Called when a packet belonging to the current monitor interval is
    /// sent.
    pub fn on_packet_sent(&mut self, sent_time: u64, packet_number: i32, bytes: u64) {
        let interval = match self.monitor_intervals.back_mut() {
            Some(interval) => interval,
            None => return,
        };

        if interval.bytes_sent == 0 {
            // This is the first packet of the interval.
            interval.first_packet_sent_time = sent_time;
            interval.first_packet_number = packet_number;
        }

        interval.last_packet_sent_time = sent_time;
        interval.last_packet_number = packet_number;
        interval.bytes_sent = interval.bytes_sent.saturating_add(bytes);
        interval.n_packets += 1;
    }

    /// Called when packets are acked or considered as lost. Returns the
    /// batch of utilities, in enqueue order, once every useful interval in
    /// the queue has one; the useful intervals are removed from the queue
    /// before returning.
    pub fn on_congestion_event(
        &mut self,
        acked_packets: &[AckedPacket],
        lost_packets: &[LostPacket],
        rtt_us: u64,
        event_time: u64,
    ) -> Option<Vec<UtilityInfo>> {
        self.num_available_intervals = 0;
        if self.num_useful_intervals == 0 {
            // Skip all the received packets if no intervals are useful.
            return None;
        }

        let mut has_invalid_utility = false;
        let mut num_available = 0;
        for interval in self.monitor_intervals.iter_mut() {
            if !interval.is_useful {
                // Skips useless monitor intervals.
                continue;
            }

            if interval.is_utility_available(event_time) {
                // Skips intervals that have available utilities.
                num_available += 1;
                continue;
            }

            for lost_packet in lost_packets {
                if interval.contains_packet(lost_packet.packet_number) {
                    interval.bytes_lost = interval.bytes_lost.saturating_add(lost_packet.bytes_lost);
                }
            }

            for acked_packet in acked_packets {
                if interval.contains_packet(acked_packet.packet_number) {
                    interval.bytes_acked =
                        interval.bytes_acked.saturating_add(acked_packet.bytes_acked);
                    interval
                        .packet_rtt_samples
                        .push(PacketRttSample::new(acked_packet.packet_number, rtt_us));
                }
            }

            if interval.is_utility_available(event_time) {
                interval.rtt_on_monitor_end_us = rtt_us;
                has_invalid_utility = !interval.calculate_utility();
                if has_invalid_utility {
                    break;
                }
                num_available += 1;
            }
        }
        self.num_available_intervals = num_available;

        if self.num_useful_intervals > self.num_available_intervals && !has_invalid_utility {
            return None;
        }

        let utility_info = if has_invalid_utility {
            // A useful interval with no valid utility invalidates the whole
            // round of trials.
            trace!("dropping {} useful intervals with invalid utility", self.num_useful_intervals);
            None
        } else {
            // All the useful intervals have available utilities now.
            Some(
                self.monitor_intervals
                    .iter()
                    .filter(|interval| interval.is_useful)
                    .map(|interval| UtilityInfo::new(interval.sending_rate, interval.utility))
                    .collect(),
            )
        };

        // Remove MonitorIntervals from the head of the queue, until all
        // useful intervals are removed.
        while self.num_useful_intervals > 0 {
            match self.monitor_intervals.pop_front() {
                Some(interval) => {
                    if interval.is_useful {
                        self.num_useful_intervals -= 1;
                    }
                }
                None => break,
            }
        }
        self.num_available_intervals = 0;

        utility_info
    }

    /// Called when the rtt inflation in STARTING mode exceeds the tolerable
    /// ratio. Clears all pending intervals.
    pub fn on_rtt_inflation_in_starting(&mut self) {
        self.monitor_intervals.clear();
        self.num_useful_intervals = 0;
        self.num_available_intervals = 0;
    }

    /// Returns the most recent MonitorInterval at the tail of the queue.
    pub fn current(&self) -> Option<&MonitorInterval> {
        self.monitor_intervals.back()
    }

    pub fn num_useful_intervals(&self) -> usize {
        self.num_useful_intervals
    }

    pub fn num_available_intervals(&self) -> usize {
        self.num_available_intervals
    }

    pub fn is_empty(&self) -> bool {
        self.monitor_intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.monitor_intervals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acked(packet_number: i32, bytes_acked: u64) -> AckedPacket {
        AckedPacket {
            packet_number,
            bytes_acked,
        }
    }

    fn lost(packet_number: i32, bytes_lost: u64) -> LostPacket {
        LostPacket {
            packet_number,
            bytes_lost,
        }
    }

    // An interval of ten 1400 byte packets sent over 9000us, fully acked.
    fn build_interval(rtt_samples: &[u64]) -> MonitorInterval {
        let mut interval = MonitorInterval::new(12.0 * MEGABIT, true, 0.0, 8000, 20000);
        interval.first_packet_sent_time = 0;
        interval.last_packet_sent_time = 9000;
        interval.first_packet_number = 1;
        interval.last_packet_number = 10;
        interval.bytes_sent = 14000;
        interval.bytes_acked = 14000;
        interval.n_packets = 10;
        for (i, rtt) in rtt_samples.iter().enumerate() {
            interval
                .packet_rtt_samples
                .push(PacketRttSample::new(1 + i as i32, *rtt));
        }
        interval
    }

    #[test]
    fn monitor_interval_new() {
        let interval = MonitorInterval::new(10.0 * MEGABIT, true, 0.3, 8000, 50000);
        assert_eq!(interval.sending_rate, 10.0 * MEGABIT);
        assert!(interval.is_useful);
        assert_eq!(interval.rtt_fluctuation_tolerance_ratio, 0.3);
        assert_eq!(interval.rtt_on_monitor_start_us, 8000);
        assert_eq!(interval.rtt_on_monitor_end_us, 8000);
        assert_eq!(interval.end_time, 50000);
        assert_eq!(interval.bytes_sent, 0);
        assert_eq!(interval.n_packets, 0);
        assert!(interval.packet_rtt_samples.is_empty());
    }

    #[test]
    fn queue_enqueue_and_counters() {
        let mut queue = MonitorIntervalQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.current().is_none());

        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, false, 0.3, 0, 1000);
        queue.enqueue_new_monitor_interval(12.0 * MEGABIT, true, 0.3, 8000, 2000);
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.num_useful_intervals(), 1);
        assert_eq!(queue.current().unwrap().sending_rate, 12.0 * MEGABIT);
    }

    #[test]
    fn queue_on_packet_sent_tracks_range() {
        let mut queue = MonitorIntervalQueue::new();

        // Sending into an empty queue is a no-op.
        queue.on_packet_sent(100, 1, 1400);
        assert!(queue.is_empty());

        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 20000);
        queue.on_packet_sent(100, 1, 1400);
        queue.on_packet_sent(200, 2, 1400);
        queue.on_packet_sent(300, 3, 1300);

        let current = queue.current().unwrap();
        assert_eq!(current.first_packet_sent_time, 100);
        assert_eq!(current.last_packet_sent_time, 300);
        assert_eq!(current.first_packet_number, 1);
        assert_eq!(current.last_packet_number, 3);
        assert_eq!(current.bytes_sent, 4100);
        assert_eq!(current.n_packets, 3);
    }

    #[test]
    fn queue_attributes_packets_to_intervals() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 60000);
        for i in 1..=5 {
            queue.on_packet_sent(i as u64 * 1000, i, 1000);
        }
        queue.enqueue_new_monitor_interval(11.0 * MEGABIT, true, 0.0, 8000, 70000);
        for i in 6..=10 {
            queue.on_packet_sent(i as u64 * 1000, i, 1000);
        }

        // An event touching both intervals, before either end time: bytes
        // are attributed but no batch is produced. Packet 99 belongs to no
        // interval and is ignored.
        let acked_packets = [acked(4, 1000), acked(5, 1000), acked(6, 1000), acked(99, 1000)];
        let lost_packets = [lost(3, 1000)];
        let out = queue.on_congestion_event(&acked_packets, &lost_packets, 8000, 20000);
        assert!(out.is_none());

        let first = &queue.monitor_intervals[0];
        let second = &queue.monitor_intervals[1];
        assert_eq!(first.bytes_acked, 2000);
        assert_eq!(first.bytes_lost, 1000);
        assert_eq!(first.packet_rtt_samples.len(), 2);
        assert_eq!(second.bytes_acked, 1000);
        assert_eq!(second.bytes_lost, 0);
        assert!(first.bytes_acked + first.bytes_lost <= first.bytes_sent);
        assert!(second.bytes_acked + second.bytes_lost <= second.bytes_sent);
        assert_eq!(queue.num_useful_intervals(), 2);
    }

    #[test]
    fn queue_no_batch_before_end_time() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 50000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.on_packet_sent(2000, 2, 1400);

        // All packets acked but the interval has not run to its end.
        let acked_packets = [acked(1, 1400), acked(2, 1400)];
        assert!(queue
            .on_congestion_event(&acked_packets, &[], 8000, 10000)
            .is_none());
        assert_eq!(queue.num_available_intervals(), 0);

        // Past the end time but with outstanding bytes there is no batch
        // either.
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 5000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.on_packet_sent(2000, 2, 1400);
        let acked_packets = [acked(1, 1400)];
        assert!(queue
            .on_congestion_event(&acked_packets, &[], 8000, 10000)
            .is_none());
    }

    #[test]
    fn queue_delivers_batch_in_enqueue_order() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 10000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.on_packet_sent(5000, 2, 1400);
        queue.enqueue_new_monitor_interval(11.0 * MEGABIT, true, 0.0, 8000, 20000);
        queue.on_packet_sent(11000, 3, 1400);
        queue.on_packet_sent(15000, 4, 1400);
        queue.enqueue_new_monitor_interval(10.5 * MEGABIT, false, 0.0, 8000, 30000);
        queue.on_packet_sent(21000, 5, 1400);

        let acked_packets = [acked(1, 1400), acked(2, 1400), acked(3, 1400), acked(4, 1400)];
        let out = queue.on_congestion_event(&acked_packets, &[], 8000, 25000);
        let batch = out.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].sending_rate, 10.0 * MEGABIT);
        assert_eq!(batch[1].sending_rate, 11.0 * MEGABIT);

        // The useful intervals are drained; the non useful tail remains.
        assert_eq!(queue.num_useful_intervals(), 0);
        assert_eq!(queue.num_available_intervals(), 0);
        assert_eq!(queue.len(), 1);
        assert!(!queue.current().unwrap().is_useful);
    }

    #[test]
    fn queue_computes_utility_once_per_interval() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 10000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.on_packet_sent(5000, 2, 1400);
        queue.enqueue_new_monitor_interval(11.0 * MEGABIT, true, 0.0, 8000, 20000);
        queue.on_packet_sent(11000, 3, 1400);
        queue.on_packet_sent(15000, 4, 1400);

        // First event completes only the first interval.
        let acked_packets = [acked(1, 1400), acked(2, 1400)];
        assert!(queue
            .on_congestion_event(&acked_packets, &[], 8000, 18000)
            .is_none());
        assert_eq!(queue.num_available_intervals(), 1);
        let first_utility = queue.monitor_intervals[0].utility;

        // A duplicate ack for the completed interval is skipped; the second
        // event completes the round and the first interval's utility is
        // unchanged.
        let acked_packets = [acked(1, 1400), acked(3, 1400), acked(4, 1400)];
        let batch = queue
            .on_congestion_event(&acked_packets, &[], 9000, 25000)
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].utility, first_utility);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_drops_batch_with_invalid_utility() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.0, 8000, 10000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.on_packet_sent(5000, 2, 1400);
        // A single packet interval yields an invalid utility.
        queue.enqueue_new_monitor_interval(11.0 * MEGABIT, true, 0.0, 8000, 20000);
        queue.on_packet_sent(11000, 3, 1400);

        let acked_packets = [acked(1, 1400), acked(2, 1400), acked(3, 1400)];
        let out = queue.on_congestion_event(&acked_packets, &[], 8000, 25000);
        assert!(out.is_none());
        assert_eq!(queue.num_useful_intervals(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_rtt_inflation_purge() {
        let mut queue = MonitorIntervalQueue::new();
        queue.enqueue_new_monitor_interval(10.0 * MEGABIT, true, 0.3, 8000, 10000);
        queue.on_packet_sent(1000, 1, 1400);
        queue.enqueue_new_monitor_interval(20.0 * MEGABIT, true, 0.3, 8000, 20000);

        queue.on_rtt_inflation_in_starting();
        assert!(queue.is_empty());
        assert_eq!(queue.num_useful_intervals(), 0);
        assert_eq!(queue.num_available_intervals(), 0);
    }

    #[test]
    fn utility_invalid_for_single_packet() {
        let mut interval = MonitorInterval::new(10.0 * MEGABIT, true, 0.0, 8000, 20000);
        interval.first_packet_sent_time = 1000;
        interval.last_packet_sent_time = 1000;
        interval.bytes_sent = 1400;
        interval.bytes_acked = 1400;
        interval.n_packets = 1;
        assert!(!interval.calculate_utility());
    }

    #[test]
    fn utility_equals_sending_factor_without_loss_or_inflation() {
        let mut interval = build_interval(&[8000; 10]);
        assert!(interval.calculate_utility());

        let mi_time_seconds = 9000.0 / 1_000_000.0;
        let sending_rate_bps = 14000.0 * 8.0 / mi_time_seconds;
        let sending_factor = (sending_rate_bps / MEGABIT).powf(0.9);
        assert_eq!(interval.utility, sending_factor);
    }

    #[test]
    fn utility_rtt_penalty_truncation() {
        // Inflations of 5.8% and 4.4% both truncate to a penalty of 0.04 and
        // must produce identical utilities; 6.3% lands in the next 0.02
        // bucket.
        let mut flat = build_interval(&[10000, 10000, 10450, 10450]);
        let mut low = build_interval(&[10000, 10000, 10600, 10600]);
        let mut high = build_interval(&[10000, 10000, 10650, 10650]);
        assert!(flat.calculate_utility());
        assert!(low.calculate_utility());
        assert!(high.calculate_utility());

        assert_eq!(low.utility, flat.utility);
        assert!(high.utility < low.utility);

        // A deflating rtt truncates toward zero and turns into a reward.
        let mut deflating = build_interval(&[10600, 10600, 10000, 10000]);
        assert!(deflating.calculate_utility());
        assert!(deflating.utility > low.utility);

        let mi_time_seconds = 9000.0 / 1_000_000.0;
        let sending_rate_bps = 14000.0 * 8.0 / mi_time_seconds;
        let sending_factor = (sending_rate_bps / MEGABIT).powf(0.9);
        assert!(deflating.utility > sending_factor);
    }

    #[test]
    fn utility_loss_tolerance_threshold() {
        // A loss rate of exactly 3% keeps the low loss coefficient.
        let mut tolerated = build_interval(&[8000; 10]);
        tolerated.bytes_acked = 13580;
        tolerated.bytes_lost = 420;
        assert!(tolerated.calculate_utility());

        let mi_time_seconds = 9000.0 / 1_000_000.0;
        let sending_rate_bps = 14000.0 * 8.0 / mi_time_seconds;
        let sending_factor = (sending_rate_bps / MEGABIT).powf(0.9);
        let loss_rate = 420.0 / 14000.0;
        let loss_contribution = 10.0 * (1.0 * ((1.0 + loss_rate) - 1.0));
        let expected = sending_factor - loss_contribution * (sending_rate_bps / MEGABIT) / 10.0;
        assert_eq!(tolerated.utility, expected);

        // A 10% loss rate is punished with the high coefficient.
        let mut heavy = build_interval(&[8000; 10]);
        heavy.bytes_acked = 12600;
        heavy.bytes_lost = 1400;
        assert!(heavy.calculate_utility());

        let loss_rate = 1400.0 / 14000.0;
        let loss_contribution = 10.0 * (11.35 * ((1.0 + loss_rate) - 1.0));
        let expected = sending_factor - loss_contribution * (sending_rate_bps / MEGABIT) / 10.0;
        assert_eq!(heavy.utility, expected);
        assert!(heavy.utility < tolerated.utility);
    }
}
