// Transient feedback state with generation-keyed auto-dismiss
// One message is active at a time. Each state change bumps a generation
// counter; a dismiss timer only clears the slot while its generation is still
// the active one, so a stale timer can never wipe a newer message.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// User-facing strings. The product ships in Vietnamese; server-provided
/// error messages are passed through untranslated.
pub mod messages {
    pub const SELECT_DATES: &str = "Vui lòng chọn ngày nhận phòng và ngày trả phòng";
    pub const INVALID_GUESTS: &str = "Vui lòng nhập số lượng người lớn và trẻ em";
    pub const BOOKING_FAILED: &str = "Đặt phòng không thành công, vui lòng thử lại";

    /// Banner text shown while a successful booking's feedback is active.
    pub fn success_banner(confirmation_code: &str) -> String {
        format!(
            "Đặt phòng thành công, đây là mã xác nhận: {confirmation_code}. \
             Tin nhắn SMS và Email về thông tin đặt chỗ đã được gửi đến bạn"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    #[default]
    None,
    Success {
        confirmation_code: String,
    },
    Error {
        message: String,
    },
}

// Dismiss delays; tests shrink these or drive them with tokio's paused clock
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub success_dismiss: Duration,
    pub error_dismiss: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            success_dismiss: Duration::from_secs(10),
            error_dismiss: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Default)]
struct FeedbackSlot {
    state: FeedbackState,
    generation: u64,
}

/// Feedback slot shared between the workflow and its dismiss timers.
#[derive(Clone, Default)]
pub struct FeedbackCell(Arc<Mutex<FeedbackSlot>>);

impl FeedbackCell {
    pub fn get(&self) -> FeedbackState {
        self.0.lock().state.clone()
    }

    /// Installs a new state, invalidating any pending dismiss of the previous
    /// one. Returns the generation token guarding the new state.
    pub fn set(&self, state: FeedbackState) -> u64 {
        let mut slot = self.0.lock();
        slot.generation += 1;
        slot.state = state;
        slot.generation
    }

    /// Clears the slot only if `generation` is still the active one.
    pub fn clear_if_current(&self, generation: u64) -> bool {
        let mut slot = self.0.lock();
        if slot.generation == generation {
            slot.state = FeedbackState::None;
            true
        } else {
            false
        }
    }

    /// Shows a state and schedules it to auto-dismiss after `delay`. The
    /// returned handle resolves to true if this state was still the active
    /// one when the timer fired.
    pub fn show_for(&self, state: FeedbackState, delay: Duration) -> JoinHandle<bool> {
        let generation = self.set(state);
        let cell = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            cell.clear_if_current(generation)
        })
    }
}
