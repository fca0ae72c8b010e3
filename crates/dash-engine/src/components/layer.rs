/// Render layer. Controls draw order.
///
/// Layers are drawn back-to-front: Background first, Overlay last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    Ground = 1,
    #[default]
    Objects = 2,
    Player = 3,
    Effects = 4,
    Overlay = 5,
}

impl RenderLayer {
    /// Convert to u8 for the render buffer wire format.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Background < RenderLayer::Ground);
        assert!(RenderLayer::Ground < RenderLayer::Objects);
        assert!(RenderLayer::Objects < RenderLayer::Player);
        assert!(RenderLayer::Player < RenderLayer::Effects);
        assert!(RenderLayer::Effects < RenderLayer::Overlay);
    }
}
