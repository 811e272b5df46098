pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_MOVIES_PATH: &str = "danh-sach/phim";
pub const DEFAULT_MOVIES_LIST_PATH: &str = "danh-sach/phim-moi-cap-nhat";
pub const DEFAULT_CATEGORIES_PATH: &str = "categories";
pub const DEFAULT_COUNTRIES_PATH: &str = "country";
pub const DEFAULT_EPISODES_ROOT: &str = "films";

pub const DEFAULT_CONFIG_FILE: &str = "phim.toml";
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const ENV_API_URL: &str = "PHIM_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "PHIM_REQUEST_TIMEOUT";
pub const ENV_MOVIES_PATH: &str = "PHIM_MOVIES_PATH";
pub const ENV_MOVIES_LIST_PATH: &str = "PHIM_MOVIES_LIST_PATH";
pub const ENV_CATEGORIES_PATH: &str = "PHIM_CATEGORIES_PATH";
pub const ENV_COUNTRIES_PATH: &str = "PHIM_COUNTRIES_PATH";
pub const ENV_EPISODES_ROOT: &str = "PHIM_EPISODES_ROOT";
