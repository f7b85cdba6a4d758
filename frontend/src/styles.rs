pub const CONTAINER: &str = "container mx-auto px-6 py-10 max-w-7xl";
pub const PAPER: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md";
pub const TOOLBAR: &str = "flex flex-wrap items-center gap-4 px-6 py-4 border-b border-gray-700";

pub const CARD_SECTION: &str = "bg-gray-800 border border-gray-700 p-6 rounded-lg shadow-sm";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";
pub const FORM_GRID: &str = "grid grid-cols-1 md:grid-cols-3 gap-4 disabled:opacity-60";
pub const LOADER_OVERLAY: &str = "absolute inset-0 z-10 flex items-center justify-center bg-gray-900/70 rounded-lg";
pub const SPINNER: &str = "animate-spin rounded-full h-12 w-12 border-4 border-blue-500 border-t-transparent";

pub const INPUT_BASE: &str = "appearance-none border bg-gray-800 text-white rounded-md w-full py-2 px-4 focus:outline-none focus:border-blue-500";
pub const INPUT_COMPACT: &str = "appearance-none border border-gray-600 bg-gray-900 text-white text-sm rounded-md py-1 px-3 focus:outline-none focus:border-blue-500";
pub const SELECT_COMPACT: &str = "border border-gray-600 bg-gray-900 text-white rounded-md py-1 px-2";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-blue-600 hover:bg-blue-700 focus:ring-2 focus:ring-blue-400 focus:outline-none";
pub const BUTTON_NEUTRAL: &str = "bg-gray-600 hover:bg-gray-700 focus:ring-2 focus:ring-gray-400 focus:outline-none";
pub const ICON_BUTTON: &str = "w-8 h-8 rounded-full text-gray-300 hover:bg-gray-700 disabled:opacity-30 disabled:cursor-not-allowed";

pub const MENU_PAPER: &str = "absolute right-0 z-20 mt-1 w-40 bg-gray-700 border border-gray-600 rounded-md shadow-lg py-1";
pub const MENU_ITEM: &str = "block w-full text-left px-4 py-2 text-sm text-gray-200 hover:bg-gray-600";

pub const TABLE: &str = "min-w-full text-sm text-left text-gray-200";
pub const TABLE_HEAD_CELL: &str = "px-4 py-3 font-semibold text-gray-300 whitespace-nowrap";
pub const TABLE_ROW: &str = "border-t border-gray-700 hover:bg-gray-700/40";
pub const TABLE_CELL: &str = "px-4 py-2 whitespace-nowrap";
pub const STATUS_ACTIVE: &str = "status-active inline-block px-2 py-1 rounded-full text-xs font-semibold bg-green-900 text-green-200";
pub const STATUS_PENDING: &str = "status-pending inline-block px-2 py-1 rounded-full text-xs font-semibold bg-yellow-900 text-yellow-200";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-gray-200";
pub const TEXT_ERROR: &str = "block text-sm text-red-500 font-semibold";
pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_MD: &str = "text-2xl font-bold mb-5 text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-gray-100";

pub const SPACE_Y_BASE: &str = "space-y-2";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, "w-full"))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn input_style(invalid: bool) -> String {
    combine_classes(INPUT_BASE, if invalid { "border-red-500" } else { "border-gray-600" })
}

pub fn alert_style(style: &str) -> String {
    match style {
        "error" => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        "warning" => combine_classes(ALERT_CARD, "bg-yellow-500 text-white shadow-lg"),
        _ => combine_classes(ALERT_CARD, "bg-blue-500 text-white shadow-lg"),
    }
}
