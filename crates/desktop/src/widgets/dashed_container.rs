use std::time::Instant;

use iced::advanced::graphics::geometry;
use iced::advanced::layout;
use iced::advanced::renderer;
use iced::advanced::widget::tree::{self, Tree};
use iced::advanced::widget::Widget;
use iced::advanced::{Clipboard, Layout, Renderer as _, Shell};
use iced::border::Border;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{
    alignment, mouse, Color, Element, Event, Length, Padding, Point, Rectangle, Renderer, Size,
    Theme,
};

use crate::theme::{border_color, surface_color};

const ANIMATION_SECS: f32 = 0.18;
const BORDER_WIDTH: f32 = 2.0;
const DASH: [f32; 2] = [6.0, 5.0];
const HOVER_TINT: f32 = 0.08;

/// Upload area: a rounded rectangle with a dashed outline that eases
/// towards the accent color while `hovered` is set. Content is centered.
pub struct DashedContainer<'a, Message> {
    content: Element<'a, Message>,
    hovered: bool,
    padding: Padding,
    width: Length,
    height: Length,
    corner_radius: f32,
}

#[derive(Debug)]
struct HoverState {
    amount: f32,
    last_tick: Instant,
}

impl Default for HoverState {
    fn default() -> Self {
        Self {
            amount: 0.0,
            last_tick: Instant::now(),
        }
    }
}

impl<'a, Message> DashedContainer<'a, Message> {
    pub fn new(content: impl Into<Element<'a, Message>>) -> Self {
        Self {
            content: content.into(),
            hovered: false,
            padding: Padding::new(16.0),
            width: Length::Fill,
            height: Length::Shrink,
            corner_radius: 12.0,
        }
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }
}

impl<Message> Widget<Message, Theme, Renderer> for DashedContainer<'_, Message> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<HoverState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(HoverState::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::positioned(
            limits,
            self.width,
            self.height,
            self.padding,
            |limits| {
                self.content.as_widget_mut().layout(
                    &mut tree.children[0],
                    renderer,
                    &limits.loose(),
                )
            },
            |content, size| {
                content.align(
                    alignment::Alignment::Center,
                    alignment::Alignment::Center,
                    size,
                )
            },
        )
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let Some(child) = layout.children().next() else {
            return;
        };
        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            child,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );

        let Event::Window(iced::window::Event::RedrawRequested(now)) = event else {
            return;
        };

        let state = tree.state.downcast_mut::<HoverState>();
        let target = if self.hovered { 1.0 } else { 0.0 };
        let step = now.duration_since(state.last_tick).as_secs_f32() / ANIMATION_SECS;

        if (state.amount - target).abs() > 0.001 {
            state.amount = if state.amount < target {
                (state.amount + step).min(target)
            } else {
                (state.amount - step).max(target)
            };
            shell.request_redraw();
        } else {
            state.amount = target;
        }
        state.last_tick = *now;
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        layout
            .children()
            .next()
            .map(|child| {
                self.content.as_widget().mouse_interaction(
                    &tree.children[0],
                    child,
                    cursor,
                    viewport,
                    renderer,
                )
            })
            .unwrap_or_default()
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        renderer_style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let Some(clipped_viewport) = bounds.intersection(viewport) else {
            return;
        };
        let Some(child) = layout.children().next() else {
            return;
        };

        let t = tree.state.downcast_ref::<HoverState>().amount;
        let accent = theme.palette().primary;
        let background = lerp_color(surface_color(theme), accent, HOVER_TINT * t);
        let outline = lerp_color(border_color(theme), accent, t);

        renderer.fill_quad(
            renderer::Quad {
                bounds,
                border: Border {
                    radius: self.corner_radius.into(),
                    ..Border::default()
                },
                ..renderer::Quad::default()
            },
            background,
        );

        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            renderer_style,
            child,
            cursor,
            &clipped_viewport,
        );

        let mut frame = Frame::new(renderer, bounds.size());
        let inset = BORDER_WIDTH / 2.0;
        let outline_path = Path::rounded_rectangle(
            Point::new(inset, inset),
            Size::new(bounds.width - BORDER_WIDTH, bounds.height - BORDER_WIDTH),
            self.corner_radius.into(),
        );
        frame.stroke(
            &outline_path,
            Stroke {
                style: canvas::Style::Solid(outline),
                width: BORDER_WIDTH,
                line_cap: canvas::LineCap::Round,
                line_dash: canvas::LineDash {
                    segments: &DASH,
                    offset: 0,
                },
                ..Stroke::default()
            },
        );
        let geom = frame.into_geometry();

        renderer.with_translation(iced::Vector::new(bounds.x, bounds.y), |renderer| {
            geometry::Renderer::draw_geometry(renderer, geom);
        });
    }
}

fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    Color {
        r: from.r + (to.r - from.r) * t,
        g: from.g + (to.g - from.g) * t,
        b: from.b + (to.b - from.b) * t,
        a: from.a + (to.a - from.a) * t,
    }
}

impl<'a, Message: 'a> From<DashedContainer<'a, Message>> for Element<'a, Message> {
    fn from(container: DashedContainer<'a, Message>) -> Self {
        Element::new(container)
    }
}

pub fn dashed_container<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
) -> DashedContainer<'a, Message> {
    DashedContainer::new(content)
}
