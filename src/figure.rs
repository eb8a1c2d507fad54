/// Gallows drawings, one per number of wrong guesses.
pub const STAGES: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

/// Height in lines of every stage
pub const FIGURE_HEIGHT: u16 = 7;

/// Figure for the given stage; stages past the last clamp to the full figure.
pub fn figure_for_stage(stage: usize) -> &'static str {
    STAGES[stage.min(STAGES.len() - 1)]
}
