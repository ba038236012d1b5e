//! Interrupt chart screen
//!
//! Owns one time list per interrupt source together with the series derived
//! from it. `update` recomputes the series, `draw` paints them; a list
//! replaced through [`InterruptScreen::set_list`] is always recomputed before
//! it is drawn.

use core::array;
use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use log::{debug, info, warn};

use super::constants::{TEXT_PADDING_LEFT_PX, TEXT_ROW_CAPACITY, TITLE_ROW_HEIGHT_PX};
use super::screen::Screen;
use crate::chart::{ChartRenderer, LaneSeries, Points, SeriesBuilder};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::interrupts::{DEFAULT_TIME_LIST_CAPACITY, InterruptTimeList, LANE_COUNT, Lane, Tick};
use crate::ui::{
    Action, ButtonAction, ButtonId, DISPLAY_WIDTH_PX, FrameContext, LIGHT_GRAY, ScreenId,
};

/// Overlaid rate chart of the three interrupt sources
pub struct InterruptScreen<const N: usize = DEFAULT_TIME_LIST_CAPACITY> {
    config: ChartConfig,
    renderer: ChartRenderer,
    lists: [InterruptTimeList<N>; LANE_COUNT],
    series: [Points<N>; LANE_COUNT],
    /// Lane list replaced or cleared since its series was computed
    stale: [bool; LANE_COUNT],
    visible: [bool; LANE_COUNT],
    start_seen_time: Option<Tick>,
    /// Tick of the last setup/update, reused when a stale lane forces a recompute
    last_now: Tick,
    /// Next draw repaints the whole display, not just the title and chart
    full_redraw: bool,
    dirty: bool,
}

impl<const N: usize> InterruptScreen<N> {
    /// Create the screen; the application keeps it for its whole lifetime
    pub fn create(config: ChartConfig) -> Self {
        info!(
            "Creating interrupt screen: {} ms window, {} events per source",
            config.geometry.window_ticks, N
        );

        Self {
            renderer: ChartRenderer::new(config.geometry, config.chart_style()),
            config,
            lists: array::from_fn(|_| InterruptTimeList::<N>::new()),
            series: array::from_fn(|_| Points::<N>::new()),
            stale: [true; LANE_COUNT],
            visible: [true; LANE_COUNT],
            start_seen_time: None,
            last_now: 0,
            full_redraw: true,
            dirty: true,
        }
    }

    /// Replace a lane's list with a fresh snapshot
    pub fn set_list(&mut self, list: InterruptTimeList<N>, lane: Lane) {
        let index = lane.index();
        // A stale recompute must still cover the newest event of the snapshot
        if let Some(newest) = list.last() {
            if newest.wrapping_sub(self.last_now) as i32 > 0 {
                self.last_now = newest;
            }
        }
        self.lists[index] = list;
        self.stale[index] = true;
        self.dirty = true;
    }

    /// [`set_list`](Self::set_list) addressed by the external 1-based list number
    ///
    /// Numbers outside `1..=3` leave every lane untouched.
    pub fn set_list_number(&mut self, list: InterruptTimeList<N>, list_num: u8) -> ChartResult<()> {
        let Some(lane) = Lane::from_number(list_num) else {
            warn!("Ignoring interrupt list for invalid lane {}", list_num);
            return Err(ChartError::InvalidLane { number: list_num });
        };
        self.set_list(list, lane);
        Ok(())
    }

    /// Recompute and draw immediately, outside the update/draw tick
    pub fn show_chart<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        ctx: &FrameContext,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.compute_chart(ctx.now);
        self.draw_screen(display)?;
        self.dirty = false;
        Ok(())
    }

    /// Rebuild all three series for the window ending at `now`
    pub fn compute_chart(&mut self, now: Tick) {
        let baseline = match self.start_seen_time {
            Some(baseline) => baseline,
            None => {
                let baseline = self.earliest_event().unwrap_or(now);
                info!("Chart baseline set to {} ms", baseline);
                self.start_seen_time = Some(baseline);
                baseline
            }
        };

        let builder = SeriesBuilder::new(self.config.geometry).with_window(baseline, now);
        for lane in Lane::ALL {
            let index = lane.index();
            let (x_offset, y_offset) = self.config.geometry.lane_offset(lane);
            builder.compute_serie(
                &self.lists[index],
                &mut self.series[index],
                x_offset,
                y_offset,
            );
        }

        self.stale = [false; LANE_COUNT];
        self.last_now = now;
        self.dirty = true;
    }

    /// Paint the three series over the previous frame
    pub fn draw_chart<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let lanes = Lane::ALL.map(|lane| LaneSeries {
            points: &self.series[lane.index()],
            color: self.config.color(lane).to_rgb565(),
            visible: self.visible[lane.index()],
        });
        self.renderer.draw_chart(display, &lanes)
    }

    /// Restart the time axis at `now`
    pub fn reset_baseline(&mut self, now: Tick) {
        info!("Chart baseline reset to {} ms", now);
        self.start_seen_time = Some(now);
        self.last_now = now;
        self.stale = [true; LANE_COUNT];
        self.dirty = true;
    }

    /// Drop a lane's events; its series is recomputed before the next draw
    pub fn clear_lane(&mut self, lane: Lane) {
        self.lists[lane.index()].clear();
        self.stale[lane.index()] = true;
        self.dirty = true;
    }

    pub fn toggle_lane(&mut self, lane: Lane) {
        let visible = &mut self.visible[lane.index()];
        *visible = !*visible;
        debug!("Lane {} visible: {}", lane.number(), *visible);
        self.dirty = true;
    }

    pub fn list(&self, lane: Lane) -> &InterruptTimeList<N> {
        &self.lists[lane.index()]
    }

    /// Last computed series of a lane
    pub fn serie(&self, lane: Lane) -> &[Point] {
        &self.series[lane.index()]
    }

    pub fn start_seen_time(&self) -> Option<Tick> {
        self.start_seen_time
    }

    pub fn is_lane_visible(&self, lane: Lane) -> bool {
        self.visible[lane.index()]
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn earliest_event(&self) -> Option<Tick> {
        self.lists.iter().filter_map(InterruptTimeList::first).min()
    }

    fn draw_title<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, TITLE_ROW_HEIGHT_PX),
        )
        .into_styled(PrimitiveStyle::with_fill(self.config.background.to_rgb565()))
        .draw(display)?;

        let mut title: String<TEXT_ROW_CAPACITY> = String::new();
        let _ = write!(
            title,
            "IRQ RATE  last {}.{} s",
            self.config.geometry.window_ticks / 1000,
            self.config.geometry.window_ticks % 1000 / 100
        );
        Text::with_baseline(
            &title,
            Point::new(TEXT_PADDING_LEFT_PX, (TITLE_ROW_HEIGHT_PX / 2) as i32),
            MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
            Baseline::Middle,
        )
        .draw(display)?;
        Ok(())
    }

    fn draw_screen<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if self.full_redraw {
            display.clear(self.config.background.to_rgb565())?;
            self.full_redraw = false;
        }
        self.draw_title(display)?;
        self.draw_chart(display)
    }
}

impl<const N: usize> Screen for InterruptScreen<N> {
    fn id(&self) -> ScreenId {
        ScreenId::Interrupts
    }

    fn title(&self) -> &str {
        "Interrupts"
    }

    fn setup(&mut self, ctx: &FrameContext) {
        if self.start_seen_time.is_none() {
            self.start_seen_time = Some(ctx.now);
            info!("Chart baseline set to {} ms", ctx.now);
        }
        self.last_now = ctx.now;
        self.stale = [true; LANE_COUNT];
        self.dirty = true;
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.compute_chart(ctx.now);
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if self.stale.iter().any(|stale| *stale) {
            debug!("Recomputing stale series before draw");
            self.compute_chart(self.last_now);
        }
        self.draw_screen(display)
    }

    fn on_button_pressed(&mut self, ctx: &FrameContext, button: ButtonId) -> Option<Action> {
        let Some(action) = self.config.buttons.action_for(button) else {
            debug!("Button {} not bound on interrupt screen", button);
            return None;
        };
        debug!("Button {} -> {:?}", button, action);

        match action {
            ButtonAction::ResetBaseline => {
                self.reset_baseline(ctx.now);
                None
            }
            ButtonAction::ClearLane(lane) => {
                self.clear_lane(lane);
                Some(Action::ClearSources(Some(lane)))
            }
            ButtonAction::ClearAll => {
                for lane in Lane::ALL {
                    self.clear_lane(lane);
                }
                Some(Action::ClearSources(None))
            }
            ButtonAction::ToggleLane(lane) => {
                self.toggle_lane(lane);
                None
            }
            ButtonAction::Refresh => {
                self.compute_chart(ctx.now);
                Some(Action::Redraw)
            }
            ButtonAction::SwitchTo(screen) => Some(Action::SwitchTo(screen)),
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.full_redraw = true;
        self.dirty = true;
    }
}
