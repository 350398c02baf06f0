// Page wiring and interaction tuning for the web front end.
//
// Scene geometry lives in `mirror_core::constants`; everything here is about
// the page: element ids, pointer thresholds and frame pacing.

// Canvas
pub const CANVAS_ID: &str = "app-canvas";

// Dimension controls per axis: slider, manual input, manual-mode checkbox
pub const WIDTH_SLIDER_ID: &str = "width-slider";
pub const WIDTH_INPUT_ID: &str = "width-input";
pub const WIDTH_MODE_ID: &str = "width-manual";
pub const HEIGHT_SLIDER_ID: &str = "height-slider";
pub const HEIGHT_INPUT_ID: &str = "height-input";
pub const HEIGHT_MODE_ID: &str = "height-manual";

// Derived read-outs
pub const PRICE_ID: &str = "price";
pub const BADGE_ID: &str = "dimension-badge";
pub const SHELF_PERCENT_ID: &str = "shelf-percent";
pub const SHELF_PERCENT_LABEL_ID: &str = "shelf-percent-value";
pub const SHELF_ROW_ID: &str = "shelf-row";

// Feature checkboxes are `feature-<id>`, placement selects `placement-<id>`,
// view buttons `view-<id>`.
pub const FEATURE_PREFIX: &str = "feature-";
pub const PLACEMENT_PREFIX: &str = "placement-";
pub const VIEW_PREFIX: &str = "view-";

// CSS custom property driving the slider track fill
pub const FILL_PROPERTY: &str = "--fill";

// Pointer
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0; // movement beyond this turns a click into a drag
pub const WHEEL_PIXELS_PER_STEP: f32 = 100.0; // one zoom step per wheel notch
pub const WHEEL_LINE_PIXELS: f32 = 16.0; // DOM_DELTA_LINE to pixels
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp long stalls (tab switch)

// Camera
pub const VIEW_TRANSITION_SEC: f32 = 0.45;

// Clear color behind the wall (#ffffff background)
pub const CLEAR_RGB: [f64; 3] = [1.0, 1.0, 1.0];
