//! Subcommand execution over simulated vendor services.
//!
//! Every command builds the same controller the framework would get, runs
//! one operation and prints the result plus the vendor traffic it caused.

use std::sync::Arc;

use eyre::Result;
use fod_config::Config;
use fod_core::mocks::LoggingCallback;
use fod_core::{CalibrationTable, DeviceController, HallPaths, KeyHandler, restore_hall_calibration};
use fod_hardware::{
    SimulatedDisplay, SimulatedFingerprint, SimulatedRinger, SimulatedVibrator, StaticProperties,
};
use serde_json::{Value, json};

use crate::cli::Commands;

pub struct Context {
    pub controller: DeviceController,
    pub display: Arc<SimulatedDisplay>,
    pub fingerprint: Arc<SimulatedFingerprint>,
    pub hall: HallPaths,
    pub json: bool,
}

impl Context {
    pub fn new(
        cfg: &Config,
        calibration: CalibrationTable,
        properties: Arc<StaticProperties>,
        json: bool,
    ) -> Result<Self> {
        let display = Arc::new(SimulatedDisplay::new());
        let fingerprint = Arc::new(SimulatedFingerprint::new());
        let controller = DeviceController::builder()
            .with_fingerprint(fingerprint.clone())
            .with_display(display.clone())
            .with_properties(properties)
            .with_calibration(calibration)
            .apply_config(cfg)
            .build()?;
        Ok(Self {
            controller,
            display,
            fingerprint,
            hall: (&cfg.paths).into(),
            json,
        })
    }

    /// One line of output: the JSON object, or `key = value` pairs.
    fn emit(&self, obj: Value) {
        if self.json {
            println!("{obj}");
            return;
        }
        if let Value::Object(map) = obj {
            for (k, v) in map {
                match v {
                    Value::String(s) => println!("{k} = {s}"),
                    other => println!("{k} = {other}"),
                }
            }
        }
    }

    fn traffic(&self) -> Value {
        let display: Vec<Value> = self
            .display
            .calls()
            .into_iter()
            .map(|(mode, value)| json!({ "mode": format!("{mode:?}"), "code": mode.code(), "value": value }))
            .collect();
        let fingerprint: Vec<Value> = self
            .fingerprint
            .statuses()
            .into_iter()
            .map(|s| json!({ "status": format!("{s:?}"), "code": s.code() }))
            .collect();
        let hbm = self
            .controller
            .hbm_node()
            .read::<i32>()
            .ok();
        json!({ "display": display, "fingerprint": fingerprint, "hbm": hbm })
    }

    fn emit_traffic(&self, op: &str) {
        let mut obj = json!({ "op": op, "state": format!("{:?}", self.controller.state()) });
        if let (Value::Object(dst), Value::Object(src)) = (&mut obj, self.traffic()) {
            dst.extend(src);
        }
        self.emit(obj);
    }
}

pub fn dispatch(ctx: &Context, cmd: &Commands) -> Result<()> {
    let ctl = &ctx.controller;
    match *cmd {
        Commands::DimAlpha { brightness } => {
            let alpha = ctl.dim_calculator().compute_dim_alpha(brightness);
            ctx.emit(json!({ "brightness": brightness, "dim_alpha": alpha }));
        }
        Commands::DimAmount { brightness } => {
            let amount = ctl.get_dim_amount(brightness);
            ctx.emit(json!({
                "brightness": brightness,
                "variant": format!("{:?}", ctl.variant()),
                "dim_amount": amount,
            }));
        }
        Commands::Table => {
            if ctx.json {
                let rows: Vec<Value> = ctl
                    .calibration()
                    .points()
                    .iter()
                    .map(|&(b, a)| json!({ "brightness": b, "alpha": a }))
                    .collect();
                println!("{}", Value::Array(rows));
            } else {
                println!("brightness,alpha");
                for (b, a) in ctl.calibration().points() {
                    println!("{b},{a}");
                }
            }
        }
        Commands::Press => {
            ctl.on_press();
            ctx.emit_traffic("press");
        }
        Commands::Release => {
            ctl.on_release();
            ctx.emit_traffic("release");
        }
        Commands::Hide => {
            ctl.on_hide_fod_view();
            ctx.emit_traffic("hide");
        }
        Commands::Enroll => {
            ctl.on_start_enroll();
            tracing::info!(state = ?ctl.state(), "enrollment started");
            ctl.on_finish_enroll();
            ctx.emit_traffic("enroll");
        }
        Commands::LongPress { enable, disable } => {
            ctl.set_long_press_enabled(enable && !disable);
            ctx.emit_traffic("long-press");
        }
        Commands::Acquired { info, code } => {
            ctl.set_callback(Some(Arc::new(LoggingCallback)));
            let handled = ctl.handle_acquired(info, code);
            ctx.emit(json!({ "info": info, "code": code, "handled": handled }));
        }
        Commands::Error { error, code } => {
            let suppressed = ctl.handle_error(error, code);
            ctx.emit(json!({ "error": error, "code": code, "suppressed": suppressed }));
        }
        Commands::Geometry => {
            ctx.emit(json!({
                "position_x": ctl.get_position_x(),
                "position_y": ctl.get_position_y(),
                "size": ctl.get_size(),
                "boost_brightness": ctl.should_boost_brightness(),
            }));
        }
        Commands::Slider { scan_code } => {
            let ringer = Arc::new(SimulatedRinger::new());
            let handler = KeyHandler::new(
                ringer.clone(),
                Some(Arc::new(SimulatedVibrator::new(true))),
            );
            let handled = handler.handle_key(scan_code);
            let mode = ringer.mode().map(|m| format!("{m:?}"));
            ctx.emit(json!({ "scan_code": scan_code, "handled": handled, "ringer": mode }));
        }
        Commands::RestoreHall => {
            let restored = match restore_hall_calibration(&ctx.hall) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "hall calibration restore failed");
                    false
                }
            };
            ctx.emit(json!({
                "restored": restored,
                "source": ctx.hall.persist.display().to_string(),
            }));
        }
        Commands::SelfCheck => {
            let table = ctl.calibration();
            ctx.emit(json!({
                "status": "ok",
                "variant": format!("{:?}", ctl.variant()),
                "calibration_points": table.len(),
                "hbm_node_present": ctl.hbm_node().exists(),
                "dim_alpha_node_present": ctl.dim_alpha_node().exists(),
            }));
        }
    }
    Ok(())
}
