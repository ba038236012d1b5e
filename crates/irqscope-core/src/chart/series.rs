//! Conversion of interrupt time lists into screen-space polylines
//!
//! The horizontal axis is time since the chart baseline, scrolled so that the
//! newest `window_ticks` are visible. The vertical axis is the smoothed
//! interrupt rate of the source at each event.

use embedded_graphics::prelude::Point;
use heapless::Vec;
use log::debug;

use super::constants::{DEFAULT_SERIES_CAPACITY, MILLIHERTZ_PER_TICK, SMOOTHING_DIVISOR};
use super::geometry::ChartGeometry;
use crate::interrupts::{InterruptTimeList, Tick};

/// Polyline of one lane, in render (chronological) order
pub type Points<const N: usize = DEFAULT_SERIES_CAPACITY> = Vec<Point, N>;

/// Exponential moving average of inter-arrival intervals
#[derive(Debug, Clone, Copy, Default)]
struct IntervalAverage {
    previous: Option<Tick>,
    smoothed: Option<u64>,
}

impl IntervalAverage {
    /// Feed the next event; returns the smoothed interval once one exists
    fn observe(&mut self, tick: Tick) -> Option<u64> {
        if let Some(previous) = self.previous {
            let interval = u64::from(tick.wrapping_sub(previous)).max(1);
            self.smoothed = Some(match self.smoothed {
                None => interval,
                Some(avg) => (avg * (SMOOTHING_DIVISOR - 1) + interval) / SMOOTHING_DIVISOR,
            });
        }
        self.previous = Some(tick);
        self.smoothed
    }
}

/// Maps time lists onto lanes for one visible window
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder {
    geometry: ChartGeometry,
    baseline: Tick,
    now: Tick,
}

impl SeriesBuilder {
    /// Builder with an empty window at tick 0
    pub fn new(geometry: ChartGeometry) -> Self {
        Self {
            geometry,
            baseline: 0,
            now: 0,
        }
    }

    /// Set the baseline and the current tick
    pub fn with_window(mut self, baseline: Tick, now: Tick) -> Self {
        self.set_window(baseline, now);
        self
    }

    pub fn set_window(&mut self, baseline: Tick, now: Tick) {
        self.baseline = baseline;
        self.now = now;
    }

    /// Ticks elapsed between the baseline and the left edge of the window
    fn origin_offset(&self) -> u32 {
        self.span().saturating_sub(self.geometry.window_ticks)
    }

    /// Ticks elapsed between the baseline and now
    fn span(&self) -> u32 {
        self.now.wrapping_sub(self.baseline)
    }

    /// Tick at the left edge of the plot
    pub fn window_origin(&self) -> Tick {
        self.baseline.wrapping_add(self.origin_offset())
    }

    /// `now` lies before the baseline; nothing is visible
    fn is_before_baseline(&self) -> bool {
        self.span() > i32::MAX as u32
    }

    /// Offset of a visible event from the window origin, if it is visible
    fn visible_offset(&self, tick: Tick) -> Option<u32> {
        if self.is_before_baseline() {
            return None;
        }
        let elapsed = tick.wrapping_sub(self.baseline);
        let origin = self.origin_offset();
        (elapsed >= origin && elapsed <= self.span()).then(|| elapsed - origin)
    }

    fn x_for(&self, offset: u32) -> i32 {
        let width = u64::from(self.geometry.width_px);
        let window = u64::from(self.geometry.window_ticks.max(1));
        (u64::from(offset) * width / window).min(width) as i32
    }

    fn height_for(&self, smoothed_interval: Option<u64>) -> i32 {
        let lane_height = u64::from(self.geometry.lane_height_px);
        let Some(interval) = smoothed_interval else {
            return 0;
        };
        let rate_mhz = MILLIHERTZ_PER_TICK / interval.max(1);
        let full_scale = u64::from(self.geometry.full_scale_mhz.max(1));
        (rate_mhz * lane_height / full_scale).min(lane_height) as i32
    }

    /// Rebuild `serie` from `time_list` for the lane at `(x_offset, y_offset)`
    ///
    /// One point per visible event. Events outside the window are dropped and,
    /// if more events are visible than `serie` can hold, the oldest visible
    /// ones are skipped.
    pub fn compute_serie<const L: usize, const P: usize>(
        &self,
        time_list: &InterruptTimeList<L>,
        serie: &mut Points<P>,
        x_offset: i32,
        y_offset: i32,
    ) {
        serie.clear();

        let visible = time_list
            .iter()
            .filter(|tick| self.visible_offset(*tick).is_some())
            .count();
        let mut skip = visible.saturating_sub(P);

        let mut average = IntervalAverage::default();
        for tick in time_list.iter() {
            let smoothed = average.observe(tick);
            let Some(offset) = self.visible_offset(tick) else {
                continue;
            };
            if skip > 0 {
                skip -= 1;
                continue;
            }

            let point = Point::new(
                x_offset + self.x_for(offset),
                y_offset - self.height_for(smoothed),
            );
            // Capacity was checked via `skip`
            let _ = serie.push(point);
        }

        debug!(
            "Computed series: {} of {} events visible, {} points",
            visible,
            time_list.len(),
            serie.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ChartGeometry {
        ChartGeometry {
            left_px: 0,
            top_px: 0,
            width_px: 300,
            lane_height_px: 40,
            lane_gap_px: 0,
            window_ticks: 100,
            full_scale_mhz: 100_000,
        }
    }

    fn assert_in_lane(serie: &[Point], y_offset: i32, lane_height: i32) {
        for point in serie {
            assert!(point.y <= y_offset, "{:?} below lane", point);
            assert!(point.y >= y_offset - lane_height, "{:?} above lane", point);
        }
    }

    #[test]
    fn test_scenario_three_events_then_eviction() {
        let mut list = InterruptTimeList::<3>::new();
        for tick in [10, 20, 35] {
            list.push(tick);
        }
        let mut serie: Points<3> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 35)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 3);
        assert!(serie[0].x < serie[1].x && serie[1].x < serie[2].x);
        assert_eq!(
            serie.iter().map(|p| p.x).collect::<alloc::vec::Vec<_>>(),
            [30, 60, 105]
        );
        assert_in_lane(&serie, 50, 40);

        list.push(50);
        SeriesBuilder::new(geometry())
            .with_window(0, 50)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 3);
        assert_eq!(
            serie.iter().map(|p| p.x).collect::<alloc::vec::Vec<_>>(),
            [60, 105, 150]
        );
        assert_in_lane(&serie, 50, 40);
    }

    #[test]
    fn test_empty_list_gives_empty_series() {
        let list = InterruptTimeList::<8>::new();
        let mut serie: Points<8> = Points::new();
        serie.push(Point::new(1, 1)).unwrap();

        SeriesBuilder::new(geometry())
            .with_window(0, 1000)
            .compute_serie(&list, &mut serie, 0, 50);

        assert!(serie.is_empty());
    }

    #[test]
    fn test_events_older_than_window_are_dropped() {
        let list = InterruptTimeList::<8>::from_ticks(&[100, 200, 300]);
        let mut serie: Points<8> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 1000)
            .compute_serie(&list, &mut serie, 0, 50);

        assert!(serie.is_empty());
    }

    #[test]
    fn test_window_scrolls_left() {
        let list = InterruptTimeList::<8>::from_ticks(&[100, 150, 190, 200]);
        let mut serie: Points<8> = Points::new();
        let builder = SeriesBuilder::new(geometry()).with_window(0, 200);

        builder.compute_serie(&list, &mut serie, 5, 50);

        assert_eq!(builder.window_origin(), 100);
        assert_eq!(
            serie.iter().map(|p| p.x).collect::<alloc::vec::Vec<_>>(),
            [5, 155, 275, 305]
        );
    }

    #[test]
    fn test_events_before_baseline_are_dropped() {
        let list = InterruptTimeList::<8>::from_ticks(&[5, 15, 25]);
        let mut serie: Points<8> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(10, 30)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 2);
        assert_eq!(serie[0].x, 15);
    }

    #[test]
    fn test_output_never_exceeds_capacity() {
        let ticks: alloc::vec::Vec<Tick> = (0..64).collect();
        let list = InterruptTimeList::<64>::from_ticks(&ticks);
        let mut serie: Points<10> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 63)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 10);
        // Oldest visible events were skipped: the newest one is last
        assert_eq!(serie[9].x, 189);
    }

    #[test]
    fn test_x_is_non_decreasing() {
        let list = InterruptTimeList::<32>::from_ticks(&[
            1, 1, 2, 3, 3, 3, 10, 11, 40, 41, 41, 60, 75, 99,
        ]);
        let mut serie: Points<32> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 99)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 14);
        assert!(serie.windows(2).all(|pair| pair[0].x <= pair[1].x));
    }

    #[test]
    fn test_faster_source_plots_higher() {
        let slow = InterruptTimeList::<8>::from_ticks(&[0, 40, 80]);
        let fast = InterruptTimeList::<8>::from_ticks(&[0, 20, 40, 60, 80]);
        let builder = SeriesBuilder::new(geometry()).with_window(0, 80);
        let mut slow_serie: Points<8> = Points::new();
        let mut fast_serie: Points<8> = Points::new();

        builder.compute_serie(&slow, &mut slow_serie, 0, 50);
        builder.compute_serie(&fast, &mut fast_serie, 0, 50);

        // 25 Hz -> 10 px, 50 Hz -> 20 px with a 100 Hz full scale over 40 px
        assert_eq!(slow_serie.last().map(|p| p.y), Some(40));
        assert_eq!(fast_serie.last().map(|p| p.y), Some(30));
    }

    #[test]
    fn test_first_event_plots_at_zero_rate() {
        let list = InterruptTimeList::<8>::from_ticks(&[10]);
        let mut serie: Points<8> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 20)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.as_slice(), [Point::new(30, 50)]);
    }

    #[test]
    fn test_burst_is_clipped_to_lane() {
        let list = InterruptTimeList::<8>::from_ticks(&[10, 10, 10, 11]);
        let mut serie: Points<8> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(0, 20)
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(serie.len(), 4);
        assert_in_lane(&serie, 50, 40);
        assert_eq!(serie[3].y, 10);
    }

    #[test]
    fn test_now_before_baseline_is_empty() {
        let list = InterruptTimeList::<8>::from_ticks(&[800, 850, 880]);
        let mut serie: Points<8> = Points::new();
        serie.push(Point::new(1, 1)).unwrap();

        SeriesBuilder::new(geometry())
            .with_window(1000, 900)
            .compute_serie(&list, &mut serie, 0, 50);

        assert!(serie.is_empty());
    }

    #[test]
    fn test_window_across_tick_rollover() {
        let baseline = u32::MAX - 20;
        let list = InterruptTimeList::<8>::from_ticks(&[u32::MAX - 10, u32::MAX, 5, 19]);
        let mut serie: Points<8> = Points::new();

        SeriesBuilder::new(geometry())
            .with_window(baseline, baseline.wrapping_add(60))
            .compute_serie(&list, &mut serie, 0, 50);

        assert_eq!(
            serie.as_slice(),
            [
                Point::new(30, 50),
                Point::new(60, 10),
                Point::new(78, 10),
                Point::new(120, 10),
            ]
        );
    }
}
