//! Fixed flavor-text tables and frame cadences.

/// CPU activity runs on frames divisible by this
pub const CPU_INTERVAL: u32 = 30;
/// Scene lines run on frames divisible by this (once per second at 60 fps)
pub const VIDEO_INTERVAL: u32 = 60;
pub const AUDIO_INTERVAL: u32 = 45;

pub const BOOT_LOGO: [&str; 6] = [
    "   _____                    __      _____ __          ",
    "  / ___/__  ______  ___  __/ /_    / ___// /_  ____  ",
    "  \\__ \\/ / / / __ \\/ _ \\/ / __/    \\__ \\/ __ \\/ __ \\ ",
    " ___/ / /_/ / /_/ /  __/ / /_    ___/ / / / / /_/ / ",
    "/____/\\__,_/ .___/\\___/_/\\__/   /____/_/ /_/\\____/  ",
    "          /_/                                         ",
];

pub const INTRO_LINES: [&str; 3] = [
    "In a world of endless possibilities...",
    "Where every button press shapes destiny...",
    "Your journey begins NOW!",
];

pub const SCENES: [&str; 7] = [
    "🌄 Rendering dynamic skybox with real-time weather",
    "🌳 Processing vertex shaders for foliage animation",
    "💫 Calculating particle physics for magic effects",
    "🎮 Updating UI elements and minimaps",
    "🏃 Animating character movements and expressions",
    "🗺️ Loading next area chunks and textures",
    "🌊 Simulating water physics and reflections",
];

pub const SOUNDS: [&str; 7] = [
    "🎵 Playing orchestral background theme",
    "💥 Processing environmental sound effects",
    "👣 Mixing footstep sounds with surface materials",
    "🌟 Triggering magical ability sound effects",
    "🗡️ Processing weapon impact sounds",
    "🌧️ Adjusting ambient weather sounds",
    "🔮 Playing character voice lines",
];

/// Button → actions, in the order buttons are offered to the input sampler
pub const DEFAULT_BUTTONS: [(&str, &[&str]); 7] = [
    ("A", &["jump", "double jump"]),
    ("B", &["attack", "special attack"]),
    ("C", &["left", "right", "up", "down"]),
    ("START", &["pause", "menu"]),
    ("Z", &["target", "lock-on"]),
    ("L", &["shield", "block"]),
    ("R", &["item", "use"]),
];

pub const DEFAULT_SPECIAL_MOVES: [([&str; 3], &str); 3] = [
    (["B", "A", "Z"], "Super Combo Attack!"),
    (["C-up", "C-up", "B"], "Magic Burst!"),
    (["Z", "R", "A"], "Ultimate Technique!"),
];

pub const STARTING_INVENTORY: [&str; 2] = ["sword", "shield"];
