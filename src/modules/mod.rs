// Module exports for pure logic
pub mod drag;   // Drag gesture tracking
pub mod pages;  // Page list mutation logic
