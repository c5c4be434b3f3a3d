//! User-facing strings. The salon's customers and staff read Vietnamese.

// ── Appointment API ──

pub const LIST_FAILED: &str = "Có lỗi xảy ra khi lấy danh sách lịch hẹn";
pub const GET_FAILED: &str = "Có lỗi xảy ra khi lấy thông tin lịch hẹn";
pub const CREATE_FAILED: &str = "Có lỗi xảy ra khi tạo lịch hẹn";
pub const UPDATE_FAILED: &str = "Có lỗi xảy ra khi cập nhật lịch hẹn";
pub const DELETE_FAILED: &str = "Có lỗi xảy ra khi xóa lịch hẹn";
pub const DELETED: &str = "Xóa lịch hẹn thành công";

pub const NOT_FOUND: &str = "Không tìm thấy lịch hẹn";
pub const MISSING_FIELDS: &str = "Vui lòng điền đầy đủ thông tin";
pub const INVALID_PHONE: &str = "Số điện thoại không hợp lệ";
pub const INVALID_NAME: &str = "Tên không hợp lệ";
pub const INVALID_SERVICE: &str = "Dịch vụ không hợp lệ";
pub const INVALID_STATUS: &str = "Trạng thái không hợp lệ";
pub const INVALID_DATETIME: &str = "Thời gian không hợp lệ";
pub const DATETIME_NOT_FUTURE: &str = "Thời gian đặt lịch phải sau thời điểm hiện tại";
pub const INVALID_BODY: &str = "Dữ liệu không hợp lệ";

// ── Booking form ──

pub const FORM_NAME_REQUIRED: &str = "Vui lòng nhập họ tên";
pub const FORM_PHONE_REQUIRED: &str = "Vui lòng nhập số điện thoại";
pub const FORM_SERVICE_REQUIRED: &str = "Vui lòng chọn dịch vụ";
pub const FORM_DATETIME_REQUIRED: &str = "Vui lòng chọn ngày giờ";
pub const FORM_DATETIME_NOT_FUTURE: &str = "Ngày giờ phải sau thời điểm hiện tại";
pub const FORM_SUBMIT_FAILED: &str = "Có lỗi xảy ra khi đặt lịch";

// ── Auth ──

pub const INVALID_CREDENTIALS: &str = "Email hoặc mật khẩu không đúng";
pub const LOGIN_FAILED: &str = "Có lỗi xảy ra khi đăng nhập";
pub const UNAUTHORIZED: &str = "Vui lòng đăng nhập";
pub const FORBIDDEN_ROLE: &str = "Bạn không có quyền truy cập";
pub const LOGGED_OUT: &str = "Đã đăng xuất";
