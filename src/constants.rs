pub const API_NAME: &str = "[parking-api]";
