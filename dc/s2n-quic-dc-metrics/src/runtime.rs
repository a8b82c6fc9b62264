// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(tokio_unstable), allow(unused))]

pub use crate::task::TaskMonitor;
use crate::{Registry, Unit};
use std::time::Duration;

#[track_caller]
fn delta(
    mut callback: impl FnMut() -> u64 + Send + 'static,
) -> impl FnMut() -> u64 + Send + 'static {
    let mut prev = callback();
    move || {
        let delta = callback() - prev;
        prev += delta;
        delta
    }
}

impl Registry {
    #[cfg(not(tokio_unstable))]
    pub fn instrument_runtime(
        &self,
        _name: &str,
        _runtime: &tokio::runtime::Handle,
        _interval_duration: std::time::Duration,
    ) {
        // no-op -- without tokio_unstable we can't access the runtime metrics
    }

    /// This should only be called once per runtime, as duplicate calls will instrument that
    /// runtime twice (presenting metrics with duplicate values).
    #[cfg(tokio_unstable)]
    pub fn instrument_runtime(
        &self,
        name: &str,
        runtime: &tokio::runtime::Handle,
        interval_duration: std::time::Duration,
    ) {
        let metrics = runtime.metrics();
        let aggregation = Some(format!("Runtime|{name}"));

        {
            let registry = self.clone();
            let aggregation = aggregation.clone();
            let metrics = runtime.metrics();
            runtime.spawn(async move {
                let mut interval = tokio::time::interval(interval_duration);

                // If we can't keep up for some reason, just skip sampling - these metrics don't
                // matter that much.
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

                let global_queue_depth = registry.register_summary(
                    "TokioRuntime:GlobalQueueDepth".into(),
                    aggregation.clone(),
                    Unit::Count,
                );
                let blocking_queue_depth = registry.register_summary(
                    "TokioRuntime:BlockingQueueDepth".into(),
                    aggregation.clone(),
                    Unit::Count,
                );
                let worker_local_queue_depth = registry.register_summary(
                    "TokioRuntime:WorkerLocalQueueDepth".into(),
                    aggregation.clone(),
                    Unit::Count,
                );

                loop {
                    global_queue_depth.record_value(metrics.global_queue_depth() as u64);
                    blocking_queue_depth.record_value(metrics.blocking_queue_depth() as u64);

                    for worker in 0..metrics.num_workers() {
                        worker_local_queue_depth
                            .record_value(metrics.worker_local_queue_depth(worker) as u64);
                    }

                    interval.tick().await;
                }
            });
        }

        self.register_list_callback(
            "TokioRuntime:NumWorkers".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                move || metrics.num_workers()
            },
        );
        self.register_list_callback(
            "TokioRuntime:NumAliveTasks".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                move || metrics.num_alive_tasks()
            },
        );
        self.register_list_callback(
            "TokioRuntime:NumBlockingThreads".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                move || metrics.num_blocking_threads()
            },
        );
        self.register_list_callback(
            "TokioRuntime:NumIdleBlockingThreads".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                move || metrics.num_idle_blocking_threads()
            },
        );
        self.register_list_callback(
            "TokioRuntime:RemoteScheduleCount".into(),
            aggregation.clone(),
            Unit::Count,
            delta({
                let metrics = metrics.clone();
                move || metrics.remote_schedule_count()
            }),
        );
        self.register_list_callback(
            "TokioRuntime:BudgetForcedYieldCount".into(),
            aggregation.clone(),
            Unit::Count,
            delta({
                let metrics = metrics.clone();
                move || metrics.budget_forced_yield_count()
            }),
        );
        self.register_list_callback(
            "TokioRuntime:RegisteredFileDescriptors".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                move || {
                    metrics.io_driver_fd_registered_count()
                        - metrics.io_driver_fd_deregistered_count()
                }
            },
        );
        self.register_list_callback(
            "TokioRuntime:FileDescriptorRegistrations".into(),
            aggregation.clone(),
            Unit::Count,
            delta({
                let metrics = metrics.clone();
                move || metrics.io_driver_fd_registered_count()
            }),
        );
        self.register_list_callback(
            "TokioRuntime:ReadyEvents".into(),
            aggregation.clone(),
            Unit::Count,
            delta({
                let metrics = metrics.clone();
                move || metrics.io_driver_ready_count()
            }),
        );

        self.register_list_callback(
            "TokioRuntime:IdleWorkerCount".into(),
            aggregation.clone(),
            Unit::Count,
            {
                let metrics = metrics.clone();
                let mut previous = vec![Duration::ZERO; metrics.num_workers()];
                move || {
                    let mut idle = 0;
                    for (idx, prev) in previous.iter_mut().enumerate() {
                        let current = metrics.worker_total_busy_duration(idx);
                        if current
                            .checked_sub(*prev)
                            .is_some_and(|d| d <= Duration::from_millis(1))
                        {
                            idle += 1;
                        }
                        *prev = current;
                    }
                    idle
                }
            },
        );

        for worker in 0..metrics.num_workers() {
            self.register_list_callback(
                "TokioRuntime:WorkerParkCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_park_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerUnparkCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_park_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerNoopCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_noop_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerStealCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_steal_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerStealOperations".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_steal_operations(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerPollCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_poll_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerTotalBusyDuration".into(),
                aggregation.clone(),
                Unit::Microsecond,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_total_busy_duration(worker).as_micros() as u64
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerBusyPercent".into(),
                aggregation.clone(),
                Unit::Percent,
                {
                    let metrics = metrics.clone();
                    let callback = move || metrics.worker_total_busy_duration(worker);

                    let mut at = std::time::Instant::now();
                    let mut prev = callback();
                    move || {
                        let new = callback();
                        let delta = new.saturating_sub(prev);
                        let elapsed = at.elapsed();
                        prev = new;
                        at = std::time::Instant::now();

                        // What % of the time since we were last polled did this worker spend busy?
                        delta.div_duration_f32(elapsed) * 100.0
                    }
                },
            );
            self.register_list_callback(
                "TokioRuntime:WorkerLocalScheduleCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_local_schedule_count(worker)
                }),
            );
            self.register_list_callback(
                "TokioRuntime:WorkerOverflowCount".into(),
                aggregation.clone(),
                Unit::Count,
                delta({
                    let metrics = metrics.clone();
                    move || metrics.worker_overflow_count(worker)
                }),
            );

            self.register_list_callback(
                "TokioRuntime:WorkerMeanPollTime".into(),
                aggregation.clone(),
                Unit::Microsecond,
                {
                    let metrics = metrics.clone();
                    move || metrics.worker_mean_poll_time(worker).as_micros() as u64
                },
            );
        }
    }
}
