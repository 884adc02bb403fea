use mlua::prelude::*;
use std::backtrace::Backtrace;
use std::panic;
use tracing::error;

use crate::log;

#[tracing::instrument(skip_all)]
fn print_object(_lua: &Lua, json: String) -> LuaResult<String> {
    Ok(crate::print_json(&json)?)
}

#[mlua::lua_module(skip_memory_check)]
fn dash_printer(lua: &Lua) -> LuaResult<mlua::Table> {
    let exports = lua.create_table()?;
    exports.set(
        "init_logging",
        lua.create_function(|_, path: String| {
            log::setup_logger(&path).map_err(|e| LuaError::external(format!("{:?}", e)))?;
            Ok(())
        })?,
    )?;

    let default = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        error!(target: "panic",
               "panic: {panic_info}\n\nBacktrace:\n{bt}");
        default(panic_info);
    }));

    exports.set("print_object", lua.create_function(print_object)?)?;

    Ok(exports)
}
