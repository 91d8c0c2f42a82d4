pub mod demo;
pub mod play;
pub mod roles;

/// Names handed to seeded demo tables, in seating order.
pub const DEMO_NAMES: [&str; 12] = [
    "Ada", "Ben", "Cleo", "Dora", "Eli", "Fern", "Gus", "Hana", "Ivo", "Juna", "Kai", "Lena",
];
