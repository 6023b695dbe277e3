// ============================================================================
// TOASTS — short-lived notifications in the top-right corner
// ============================================================================

use std::time::{Duration, Instant};

use eframe::egui;
use egui::RichText;

/// How long a toast stays on screen, in seconds (slide in + hold + slide out).
pub const TOAST_SECS: f32 = 2.8;

#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Default)]
pub struct NotificationHandler {
    notifications: Vec<Notification>,
}

impl NotificationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_info(&mut self, title: &str, message: &str) {
        self.notifications.push(Notification {
            title: title.to_string(),
            message: message.to_string(),
            created_at: Instant::now(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn cleanup_old_notifications(&mut self, max_age_secs: f32) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.created_at).as_secs_f32() < max_age_secs);
    }

    /// Draw all live toasts stacked down the right edge, then drop expired ones.
    pub fn render(&mut self, ctx: &egui::Context) {
        if self.notifications.is_empty() {
            return;
        }

        let now = Instant::now();
        let screen_rect = ctx.screen_rect();
        let max_width = 320.0;
        let x = screen_rect.max.x - 4.0;
        let mut y = screen_rect.min.y + 32.0;
        let slide_in = 0.35;
        let slide_out = 0.45;
        let smooth = |t: f32| t * t * (3.0 - 2.0 * t);

        for (idx, notification) in self.notifications.iter().enumerate() {
            let age = now.duration_since(notification.created_at).as_secs_f32();
            if age >= TOAST_SECS {
                continue;
            }
            let slide = if age < slide_in {
                smooth((age / slide_in).clamp(0.0, 1.0))
            } else if age > TOAST_SECS - slide_out {
                smooth(((TOAST_SECS - age) / slide_out).clamp(0.0, 1.0))
            } else {
                1.0
            };
            let x_pos = x + (1.0 - slide) * (max_width + 24.0);
            let fill = egui::Color32::from_rgba_premultiplied(20, 20, 20, 200);
            let stroke = egui::Color32::from_rgba_premultiplied(80, 80, 80, 200);
            let text = egui::Color32::from_rgba_premultiplied(235, 235, 235, 230);

            egui::Area::new(egui::Id::new(("toast", idx)))
                .order(egui::Order::Foreground)
                .interactable(false)
                .pivot(egui::Align2::RIGHT_TOP)
                .fixed_pos(egui::pos2(x_pos, y))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .rounding(egui::Rounding::same(6.0))
                        .show(ui, |ui| {
                            ui.set_max_width(max_width);
                            ui.label(RichText::new(&notification.title).color(text).strong().size(15.0));
                            if !notification.message.is_empty() {
                                ui.label(RichText::new(&notification.message).color(text).size(13.0));
                            }
                        });
                });
            y += 60.0;
        }

        self.cleanup_old_notifications(TOAST_SECS);
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_toasts_are_dropped() {
        let mut handler = NotificationHandler::new();
        handler.show_info("Error", "");
        handler.notifications[0].created_at = Instant::now() - Duration::from_secs(5);
        handler.show_info("Fresh", "still here");

        handler.cleanup_old_notifications(TOAST_SECS);
        assert_eq!(handler.notifications().len(), 1);
        assert_eq!(handler.notifications()[0].title, "Fresh");
    }
}
