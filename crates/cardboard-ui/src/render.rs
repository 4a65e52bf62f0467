/// Receives the card's live vertical origin.
pub trait CardRenderer {
    fn set_card_origin(&self, origin_y: f32);
}

impl<F> CardRenderer for F
where
    F: Fn(f32),
{
    fn set_card_origin(&self, origin_y: f32) {
        self(origin_y)
    }
}
