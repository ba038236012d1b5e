//! Drawing of lane series onto a display
//!
//! Rendering is layered: background, lane baselines and labels, then the
//! series in lane order so later lanes overlay earlier ones.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::constants::{
    BASELINE_DASH_PX, BASELINE_GAP_PX, LANE_LABEL_MARGIN_PX, SERIES_LINE_WIDTH_PX,
};
use super::geometry::ChartGeometry;
use crate::interrupts::{LANE_COUNT, Lane};

/// Draw `serie` as straight segments between consecutive points
///
/// An empty series draws nothing and a single point draws one pixel.
pub fn draw_serie<D: DrawTarget<Color = Rgb565>>(
    serie: &[Point],
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    match serie {
        [] => Ok(()),
        [single] => Pixel(*single, color).draw(display),
        _ => {
            let line_style = PrimitiveStyle::with_stroke(color, SERIES_LINE_WIDTH_PX);
            for pair in serie.windows(2) {
                Line::new(pair[0], pair[1])
                    .into_styled(line_style)
                    .draw(display)?;
            }
            Ok(())
        }
    }
}

/// One lane's input to [`ChartRenderer::draw_chart`]
#[derive(Debug, Clone, Copy)]
pub struct LaneSeries<'a> {
    pub points: &'a [Point],
    pub color: Rgb565,
    pub visible: bool,
}

/// Colors of the chart furniture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub background: Rgb565,
    pub grid: Rgb565,
}

/// Paints the three lanes of the interrupt chart
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    geometry: ChartGeometry,
    style: ChartStyle,
}

impl ChartRenderer {
    pub fn new(geometry: ChartGeometry, style: ChartStyle) -> Self {
        Self { geometry, style }
    }

    /// Region overwritten by [`draw_chart`](Self::draw_chart), labels included
    pub fn region(&self) -> Rectangle {
        let area = self.geometry.chart_area();
        let left = area.top_left.x.min(0);
        Rectangle::new(
            Point::new(left, area.top_left.y),
            Size::new(
                (area.top_left.x - left) as u32 + area.size.width,
                area.size.height,
            ),
        )
    }

    /// Clear the chart region and draw lanes 1, 2, 3 in that order
    pub fn draw_chart<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        lanes: &[LaneSeries<'_>; LANE_COUNT],
    ) -> Result<(), D::Error> {
        self.region()
            .into_styled(PrimitiveStyle::with_fill(self.style.background))
            .draw(display)?;

        for (lane, series) in Lane::ALL.iter().zip(lanes.iter()) {
            self.draw_lane_furniture(*lane, series, display)?;
        }

        for series in lanes.iter().filter(|series| series.visible) {
            draw_serie(series.points, series.color, display)?;
        }

        Ok(())
    }

    /// Dashed zero-rate baseline and the lane label
    fn draw_lane_furniture<D: DrawTarget<Color = Rgb565>>(
        &self,
        lane: Lane,
        series: &LaneSeries<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let (x_offset, y_offset) = self.geometry.lane_offset(lane);
        let end_x = x_offset + self.geometry.width_px as i32;
        let grid_style = PrimitiveStyle::with_stroke(self.style.grid, 1);
        let pattern = (BASELINE_DASH_PX + BASELINE_GAP_PX) as i32;

        let mut x = x_offset;
        while x <= end_x {
            let dash_end = (x + BASELINE_DASH_PX as i32 - 1).min(end_x);
            Line::new(Point::new(x, y_offset), Point::new(dash_end, y_offset))
                .into_styled(grid_style)
                .draw(display)?;
            x += pattern;
        }

        let label_color = if series.visible {
            series.color
        } else {
            self.style.grid
        };
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            lane.label(),
            Point::new(
                x_offset - LANE_LABEL_MARGIN_PX,
                y_offset - self.geometry.lane_height_px as i32 / 2,
            ),
            MonoTextStyle::new(&FONT_6X10, label_color),
            text_style,
        )
        .draw(display)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::{COLOR_BACKGROUND, COLOR_GRID};
    use embedded_graphics::mock_display::MockDisplay;

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(
            ChartGeometry::default(),
            ChartStyle {
                background: COLOR_BACKGROUND.to_rgb565(),
                grid: COLOR_GRID.to_rgb565(),
            },
        )
    }

    #[test]
    fn test_empty_serie_draws_nothing() {
        let mut fb = FrameBuffer::new();
        draw_serie(&[], Rgb565::RED, &mut fb).unwrap();
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_single_point_draws_one_pixel() {
        let mut fb = FrameBuffer::new();
        draw_serie(&[Point::new(40, 40)], Rgb565::RED, &mut fb).unwrap();

        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(40, 40), Size::new(1, 1)))
        );
        assert_eq!(fb.pixel(40, 40), Some(Rgb565::RED));
    }

    #[test]
    fn test_segments_connect_consecutive_points() {
        let mut fb = FrameBuffer::new();
        let serie = [Point::new(10, 50), Point::new(20, 50), Point::new(20, 60)];
        draw_serie(&serie, Rgb565::GREEN, &mut fb).unwrap();

        assert_eq!(fb.pixel(15, 50), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(20, 55), Some(Rgb565::GREEN));
        // No segment closes the polyline
        assert_eq!(fb.pixel(15, 55), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_serie_pattern_on_mock_display() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        // Segments share their joint pixel
        display.set_allow_overdraw(true);

        let serie = [Point::new(0, 1), Point::new(2, 1), Point::new(2, 3)];
        draw_serie(&serie, Rgb565::RED, &mut display).unwrap();

        display.assert_pattern(&[
            "   ", //
            "RRR", //
            "  R", //
            "  R", //
        ]);
    }

    #[test]
    fn test_later_lanes_overlay_earlier_ones() {
        let geometry = ChartGeometry::default();
        let (x, y) = geometry.lane_offset(Lane::Second);
        let crossing = [Point::new(x, y - 10), Point::new(x + 40, y - 10)];
        let mut fb = FrameBuffer::new();

        renderer()
            .draw_chart(
                &mut fb,
                &[
                    LaneSeries {
                        points: &crossing,
                        color: Rgb565::RED,
                        visible: true,
                    },
                    LaneSeries {
                        points: &[],
                        color: Rgb565::GREEN,
                        visible: true,
                    },
                    LaneSeries {
                        points: &crossing,
                        color: Rgb565::BLUE,
                        visible: true,
                    },
                ],
            )
            .unwrap();

        assert_eq!(fb.pixel(x + 20, y - 10), Some(Rgb565::BLUE));
    }

    #[test]
    fn test_hidden_lane_is_not_drawn() {
        let geometry = ChartGeometry::default();
        let (x, y) = geometry.lane_offset(Lane::First);
        let serie = [Point::new(x, y - 5), Point::new(x + 30, y - 5)];
        let mut fb = FrameBuffer::new();

        renderer()
            .draw_chart(
                &mut fb,
                &[
                    LaneSeries {
                        points: &serie,
                        color: Rgb565::RED,
                        visible: false,
                    },
                    LaneSeries {
                        points: &[],
                        color: Rgb565::GREEN,
                        visible: true,
                    },
                    LaneSeries {
                        points: &[],
                        color: Rgb565::BLUE,
                        visible: true,
                    },
                ],
            )
            .unwrap();

        assert_eq!(fb.pixel(x + 15, y - 5), Some(COLOR_BACKGROUND.to_rgb565()));
    }

    #[test]
    fn test_draw_chart_clears_previous_frame() {
        let geometry = ChartGeometry::default();
        let (x, y) = geometry.lane_offset(Lane::Third);
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(x + 100, y - 30), Rgb565::WHITE)
            .draw(&mut fb)
            .unwrap();

        let empty = LaneSeries {
            points: &[],
            color: Rgb565::RED,
            visible: true,
        };
        renderer().draw_chart(&mut fb, &[empty; 3]).unwrap();

        assert_eq!(
            fb.pixel(x + 100, y - 30),
            Some(COLOR_BACKGROUND.to_rgb565())
        );
    }
}
