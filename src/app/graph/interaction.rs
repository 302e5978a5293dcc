use eframe::egui::{self, Pos2, Rect, Ui};

use crm_graph::engine::interaction::PointerEvent;

#[derive(Clone, Copy, Debug, Default)]
pub(in crate::app) struct PointerFrame {
    pub latest: Option<Pos2>,
    pub over_canvas: bool,
    pub pressed: bool,
    pub released: bool,
    pub scroll: f32,
}

impl PointerFrame {
    pub(in crate::app) fn read(ui: &Ui, rect: Rect, response: &egui::Response) -> Self {
        let (latest, pressed, released, scroll) = ui.input(|input| {
            (
                input.pointer.latest_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.raw_scroll_delta.y,
            )
        });
        Self {
            latest,
            over_canvas: latest.is_some_and(|pointer| rect.contains(pointer))
                && response.contains_pointer(),
            pressed,
            released,
            scroll,
        }
    }
}

fn to_local(rect: Rect, position: Pos2) -> Pos2 {
    (position - rect.min).to_pos2()
}

pub(in crate::app) fn pointer_events(
    frame: PointerFrame,
    rect: Rect,
    dragging: bool,
    last_local: Option<Pos2>,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let Some(pointer) = frame.latest else {
        events.push(PointerEvent::Leave);
        if frame.released {
            events.push(PointerEvent::UpOutside(last_local.unwrap_or(Pos2::ZERO)));
        }
        return events;
    };

    let inside = frame.over_canvas;
    let local = to_local(rect, pointer);

    if inside || dragging {
        events.push(PointerEvent::Move(local));
    }
    if !inside {
        events.push(PointerEvent::Leave);
    }

    if frame.pressed && inside {
        events.push(PointerEvent::Down(local));
    }
    if frame.released {
        events.push(if inside {
            PointerEvent::Up(local)
        } else {
            PointerEvent::UpOutside(local)
        });
    }

    if inside && frame.scroll.abs() > f32::EPSILON {
        events.push(PointerEvent::Wheel {
            position: local,
            delta: frame.scroll,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_max(pos2(100.0, 50.0), pos2(900.0, 650.0))
    }

    #[test]
    fn release_without_pointer_position_ends_the_gesture() {
        let frame = PointerFrame {
            released: true,
            ..PointerFrame::default()
        };
        let events = pointer_events(frame, canvas(), true, Some(pos2(790.0, 12.0)));
        assert_eq!(
            events,
            vec![
                PointerEvent::Leave,
                PointerEvent::UpOutside(pos2(790.0, 12.0))
            ]
        );
    }

    #[test]
    fn press_inside_is_reported_in_canvas_coordinates() {
        let frame = PointerFrame {
            latest: Some(pos2(140.0, 90.0)),
            over_canvas: true,
            pressed: true,
            ..PointerFrame::default()
        };
        let events = pointer_events(frame, canvas(), false, None);
        assert_eq!(
            events,
            vec![
                PointerEvent::Move(pos2(40.0, 40.0)),
                PointerEvent::Down(pos2(40.0, 40.0))
            ]
        );
    }

    #[test]
    fn release_off_canvas_while_dragging_is_an_outside_release() {
        let frame = PointerFrame {
            latest: Some(pos2(20.0, 20.0)),
            released: true,
            ..PointerFrame::default()
        };
        let events = pointer_events(frame, canvas(), true, None);
        assert_eq!(events.last(), Some(&PointerEvent::UpOutside(pos2(-80.0, -30.0))));
    }
}
