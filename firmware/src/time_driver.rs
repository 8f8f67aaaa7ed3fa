//! Embassy time driver for CH32V203, backed by the SysTick counter
//!
//! One alarm slot is enough here: the executor multiplexes the ticker and
//! selector timers onto it.

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

pub struct SysTickDriver {
    tick_count: AtomicU32,
    alarm_at: AtomicU64,
    alarm_taken: AtomicBool,
    alarm_callback: AtomicU64,
    alarm_ctx: AtomicU64,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            tick_count: AtomicU32::new(0),
            alarm_at: AtomicU64::new(u64::MAX),
            alarm_taken: AtomicBool::new(false),
            alarm_callback: AtomicU64::new(0),
            alarm_ctx: AtomicU64::new(0),
        }
    }

    /// Advance the tick counter (called from the SysTick interrupt) and fire
    /// the alarm if its deadline passed
    pub fn tick(&self) {
        let now = self.tick_count.fetch_add(1, Ordering::Relaxed) as u64 + 1;
        if now >= self.alarm_at.load(Ordering::Relaxed) {
            self.alarm_at.store(u64::MAX, Ordering::Relaxed);
            let callback = self.alarm_callback.load(Ordering::Relaxed);
            if callback != 0 {
                let f: fn(*mut ()) = unsafe { core::mem::transmute(callback as usize) };
                f(self.alarm_ctx.load(Ordering::Relaxed) as usize as *mut ());
            }
        }
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed) as u64
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        if self.alarm_taken.swap(true, Ordering::Relaxed) {
            None
        } else {
            Some(AlarmHandle::new(0))
        }
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, callback: fn(*mut ()), ctx: *mut ()) {
        self.alarm_callback
            .store(callback as usize as u64, Ordering::Relaxed);
        self.alarm_ctx.store(ctx as usize as u64, Ordering::Relaxed);
    }

    fn set_alarm(&self, _alarm: AlarmHandle, timestamp: u64) -> bool {
        if timestamp <= self.now() {
            return false;
        }
        self.alarm_at.store(timestamp, Ordering::Relaxed);
        true
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

/// SysTick interrupt entry point, to be wired by the vector table
pub fn on_systick() {
    DRIVER.tick();
}

// Critical section implementation for single-core RISC-V
critical_section::set_impl!(RiscvCriticalSection);

struct RiscvCriticalSection;

unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> u8 {
        let mut mstatus: usize;
        core::arch::asm!("csrrci {}, mstatus, 8", out(reg) mstatus);
        (mstatus & 8) as u8
    }

    unsafe fn release(was_active: u8) {
        if was_active != 0 {
            core::arch::asm!("csrsi mstatus, 8");
        }
    }
}
