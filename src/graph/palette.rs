use std::collections::HashMap;

use eframe::egui::Color32;

/// Fixed faculty palette, assigned in first-seen order and cycling once
/// all eight colors are taken.
pub const CATEGORY_COLORS: [Color32; 8] = [
    Color32::from_rgb(0x19, 0x19, 0x70),
    Color32::from_rgb(0x00, 0x64, 0x00),
    Color32::from_rgb(0xff, 0x00, 0x00),
    Color32::from_rgb(0xff, 0xd7, 0x00),
    Color32::from_rgb(0x00, 0xff, 0x00),
    Color32::from_rgb(0x00, 0xff, 0xff),
    Color32::from_rgb(0xff, 0x00, 0xff),
    Color32::from_rgb(0xff, 0xb6, 0xc1),
];

/// Color for studies that only ever appear as a reference target.
pub const NEUTRAL_COLOR: Color32 = Color32::from_rgb(0xbb, 0xbb, 0xbb);

/// Tag-to-color assignment. Owned by the builder rather than living in
/// process-wide state; assignments persist for the builder's lifetime
/// and are never reassigned.
#[derive(Debug, Default)]
pub struct Palette {
    assigned: HashMap<String, Color32>,
    untagged: Option<Color32>,
    next: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for a faculty tag, assigning the next palette
    /// slot on first sight. Records without any tag share one slot.
    pub fn color_for(&mut self, tag: Option<&str>) -> Color32 {
        match tag {
            Some(tag) => {
                if let Some(&color) = self.assigned.get(tag) {
                    return color;
                }
                let color = self.take_next();
                self.assigned.insert(tag.to_owned(), color);
                color
            }
            None => match self.untagged {
                Some(color) => color,
                None => {
                    let color = self.take_next();
                    self.untagged = Some(color);
                    color
                }
            },
        }
    }

    fn take_next(&mut self) -> Color32 {
        let color = CATEGORY_COLORS[self.next % CATEGORY_COLORS.len()];
        self.next += 1;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_reused_not_reassigned() {
        let mut palette = Palette::new();
        assert_eq!(palette.color_for(Some("Science")), CATEGORY_COLORS[0]);
        assert_eq!(palette.color_for(Some("Arts")), CATEGORY_COLORS[1]);
        assert_eq!(palette.color_for(Some("Science")), CATEGORY_COLORS[0]);
    }

    #[test]
    fn palette_cycles_after_exhaustion() {
        let mut palette = Palette::new();
        for index in 0..CATEGORY_COLORS.len() {
            palette.color_for(Some(&format!("faculty-{index}")));
        }
        assert_eq!(palette.color_for(Some("one-more")), CATEGORY_COLORS[0]);
    }

    #[test]
    fn untagged_records_share_one_slot() {
        let mut palette = Palette::new();
        let first = palette.color_for(None);
        assert_eq!(palette.color_for(None), first);
        // The untagged slot consumed palette[0]; the next tag gets [1].
        assert_eq!(palette.color_for(Some("Science")), CATEGORY_COLORS[1]);
    }
}
