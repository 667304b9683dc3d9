//! ASCII logo banner printed ahead of the reports

pub const LOGO: &str = r#"
 ____   _  _____ ____ _   _      _   _   _ ____ ___ _____
|  _ \ / \|_   _/ ___| | | |    / \ | | | |  _ \_ _|_   _|
| |_) / _ \ | || |   | |_| |   / _ \| | | | | | | |  | |
|  __/ ___ \| || |___|  _  |  / ___ \ |_| | |_| | |  | |
|_| /_/   \_\_| \____|_| |_| /_/   \_\___/|____/___| |_|
"#;
