use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::constants::{
    HINT_BOTTOM_MARGIN_PX, OPEN_CHART_BUTTON, SUMMARY_FIRST_ROW_Y_PX, SUMMARY_ROW_PITCH_PX,
    TEXT_PADDING_LEFT_PX, TEXT_ROW_CAPACITY, TITLE_ROW_HEIGHT_PX,
};
use super::screen::Screen;
use crate::interrupts::{InterruptTimeList, LANE_COUNT, Lane, Tick};
use crate::ui::{
    Action, ButtonId, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, FrameContext, LIGHT_GRAY, RgbColor,
    ScreenId, WHITE,
};

/// What the home screen shows about one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Events currently retained in the source's list
    pub retained: usize,
    /// Gap between the two newest events
    pub last_interval: Option<Tick>,
}

/// Landing screen listing the three sources
pub struct HomeScreen {
    summaries: [SourceSummary; LANE_COUNT],
    colors: [RgbColor; LANE_COUNT],
    background: RgbColor,
    dirty: bool,
}

impl HomeScreen {
    pub fn new(colors: [RgbColor; LANE_COUNT], background: RgbColor) -> Self {
        Self {
            summaries: [SourceSummary::default(); LANE_COUNT],
            colors,
            background,
            dirty: true,
        }
    }

    /// Refresh a source's row from its latest snapshot
    pub fn set_summary<const N: usize>(&mut self, lane: Lane, list: &InterruptTimeList<N>) {
        let summary = SourceSummary {
            retained: list.len(),
            last_interval: list.last_interval(),
        };
        if self.summaries[lane.index()] != summary {
            self.summaries[lane.index()] = summary;
            self.dirty = true;
        }
    }

    pub fn summary(&self, lane: Lane) -> SourceSummary {
        self.summaries[lane.index()]
    }

    fn draw_row<D: DrawTarget<Color = Rgb565>>(
        &self,
        lane: Lane,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let summary = self.summaries[lane.index()];
        let mut row: String<TEXT_ROW_CAPACITY> = String::new();
        let _ = write!(row, "{}  events: {:>3}", lane.label(), summary.retained);
        let _ = match summary.last_interval {
            Some(interval) => write!(row, "  last: {} ms", interval),
            None => write!(row, "  last: -"),
        };

        let y = SUMMARY_FIRST_ROW_Y_PX + lane.index() as i32 * SUMMARY_ROW_PITCH_PX;
        Text::with_baseline(
            &row,
            Point::new(TEXT_PADDING_LEFT_PX, y),
            MonoTextStyle::new(&FONT_6X10, self.colors[lane.index()].to_rgb565()),
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }
}

impl Screen for HomeScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Home
    }

    fn title(&self) -> &str {
        "Home"
    }

    fn setup(&mut self, _ctx: &FrameContext) {
        self.dirty = true;
    }

    fn update(&mut self, _ctx: &FrameContext) {}

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(self.background.to_rgb565()))
        .draw(display)?;

        Text::with_baseline(
            "IRQ SCOPE",
            Point::new(TEXT_PADDING_LEFT_PX, (TITLE_ROW_HEIGHT_PX / 2) as i32),
            MonoTextStyle::new(&FONT_6X10, WHITE),
            Baseline::Middle,
        )
        .draw(display)?;

        for lane in Lane::ALL {
            self.draw_row(lane, display)?;
        }

        let mut hint: String<TEXT_ROW_CAPACITY> = String::new();
        let _ = write!(hint, "[{}] open chart", OPEN_CHART_BUTTON);
        Text::with_baseline(
            &hint,
            Point::new(
                TEXT_PADDING_LEFT_PX,
                DISPLAY_HEIGHT_PX as i32 - HINT_BOTTOM_MARGIN_PX,
            ),
            MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
            Baseline::Bottom,
        )
        .draw(display)?;

        Ok(())
    }

    fn on_button_pressed(&mut self, _ctx: &FrameContext, button: ButtonId) -> Option<Action> {
        (button == OPEN_CHART_BUTTON).then_some(Action::SwitchTo(ScreenId::Interrupts))
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::{COLOR_BACKGROUND, COLOR_SERIES_FIRST, COLOR_SERIES_SECOND, COLOR_SERIES_THIRD};

    fn home() -> HomeScreen {
        HomeScreen::new(
            [COLOR_SERIES_FIRST, COLOR_SERIES_SECOND, COLOR_SERIES_THIRD],
            COLOR_BACKGROUND,
        )
    }

    #[test]
    fn test_summary_tracks_snapshot() {
        let mut screen = home();
        screen.mark_clean();
        let list = InterruptTimeList::<8>::from_ticks(&[100, 140, 190]);

        screen.set_summary(Lane::Third, &list);

        assert_eq!(
            screen.summary(Lane::Third),
            SourceSummary {
                retained: 3,
                last_interval: Some(50),
            }
        );
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_unchanged_summary_keeps_screen_clean() {
        let mut screen = home();
        screen.mark_clean();

        screen.set_summary(Lane::First, &InterruptTimeList::<8>::new());

        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_open_chart_button() {
        let mut screen = home();
        let ctx = FrameContext::at(0);

        assert_eq!(
            screen.on_button_pressed(&ctx, OPEN_CHART_BUTTON),
            Some(Action::SwitchTo(ScreenId::Interrupts))
        );
        assert_eq!(screen.on_button_pressed(&ctx, OPEN_CHART_BUTTON + 1), None);
    }

    #[test]
    fn test_rows_use_lane_colors() {
        let mut screen = home();
        let mut fb = FrameBuffer::new();
        screen.draw(&mut fb).unwrap();

        for lane in Lane::ALL {
            let y = SUMMARY_FIRST_ROW_Y_PX + lane.index() as i32 * SUMMARY_ROW_PITCH_PX;
            let row = Rectangle::new(
                Point::new(0, y),
                Size::new(DISPLAY_WIDTH_PX as u32, 10),
            );
            let color = screen.colors[lane.index()].to_rgb565();
            assert!(row.points().any(|p| fb.pixel(p.x, p.y) == Some(color)));
        }
    }
}
