use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SalonService {
    pub code: &'static str,
    pub name: &'static str,
    pub price_vnd: u32,
}

pub const SERVICES: &[SalonService] = &[
    SalonService {
        code: "cut-male",
        name: "Cắt tóc nam",
        price_vnd: 80_000,
    },
    SalonService {
        code: "cut-female",
        name: "Cắt tóc nữ",
        price_vnd: 120_000,
    },
    SalonService {
        code: "dye",
        name: "Nhuộm tóc",
        price_vnd: 300_000,
    },
    SalonService {
        code: "style",
        name: "Tạo kiểu",
        price_vnd: 150_000,
    },
    SalonService {
        code: "wash",
        name: "Gội đầu",
        price_vnd: 50_000,
    },
    SalonService {
        code: "vip",
        name: "Gói VIP",
        price_vnd: 500_000,
    },
];

pub fn find_service(code: &str) -> Option<&'static SalonService> {
    SERVICES.iter().find(|s| s.code == code)
}

/// "80.000đ", the vi-VN grouping.
pub fn format_price(vnd: u32) -> String {
    let digits = vnd.to_string();
    let mut out = String::with_capacity(digits.len() + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push('đ');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_service() {
        assert_eq!(find_service("vip").map(|s| s.price_vnd), Some(500_000));
        assert!(find_service("massage").is_none());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(80_000), "80.000đ");
        assert_eq!(format_price(500), "500đ");
        assert_eq!(format_price(1_500_000), "1.500.000đ");
    }
}
