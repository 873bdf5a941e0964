use crate::ast::Function;
use crate::backend::Backend;
use crate::error::BackendError;
use crate::program::{Instr, Program};
use cranelift::codegen::ir::FuncRef;
use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module};
use cranelift_native as native;
use log::debug;
use std::collections::HashMap;

type JitFn = unsafe extern "C" fn(*const f64) -> f64;

const ENTRY_SYMBOL: &str = "jitcalc_expr";
const POW_SYMBOL: &str = "jitcalc_pow";

extern "C" fn shim_pow(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

// Host shims for the unary functions. They call `Function::apply` so compiled
// code and the interpreters share one implementation.
macro_rules! unary_shims {
    ($($shim:ident => $func:ident),* $(,)?) => {
        $(
            extern "C" fn $shim(x: f64) -> f64 {
                Function::$func.apply(x)
            }
        )*

        fn unary_shim(func: Function) -> extern "C" fn(f64) -> f64 {
            match func {
                $(Function::$func => $shim,)*
            }
        }
    };
}

unary_shims! {
    shim_sqrt => Sqrt,
    shim_log => Log,
    shim_sin => Sin,
    shim_cos => Cos,
    shim_tan => Tan,
    shim_asin => Asin,
    shim_acos => Acos,
    shim_atan => Atan,
}

fn unary_symbol(func: Function) -> String {
    format!("jitcalc_{}", func.name())
}

fn compile_err(e: impl ToString) -> BackendError {
    BackendError::CompileFailed(e.to_string())
}

/// Compiles programs to native code with Cranelift.
///
/// Every compile gets its own `JITModule`; nothing is shared between calls.
#[derive(Clone, Debug)]
pub struct JitBackend {
    opt_level: &'static str,
}

impl Default for JitBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl JitBackend {
    pub fn new() -> Self {
        Self { opt_level: "speed" }
    }

    /// Cranelift `opt_level` setting: `"none"`, `"speed"` or `"speed_and_size"`.
    pub fn with_opt_level(opt_level: &'static str) -> Self {
        Self { opt_level }
    }

    pub fn opt_level(&self) -> &'static str {
        self.opt_level
    }

    fn new_module(&self) -> Result<JITModule, BackendError> {
        let mut flag_builder = settings::builder();
        flag_builder
            .set("opt_level", self.opt_level)
            .map_err(|e| BackendError::CompileFailed(format!("settings error: {}", e)))?;
        let isa_builder = native::builder().map_err(compile_err)?;
        let isa = isa_builder
            .finish(settings::Flags::new(flag_builder))
            .map_err(compile_err)?;

        let mut jb = JITBuilder::with_isa(isa, cranelift_module::default_libcall_names());
        let pow: extern "C" fn(f64, f64) -> f64 = shim_pow;
        jb.symbol(POW_SYMBOL, pow as *const u8);
        for func in Function::ALL {
            jb.symbol(unary_symbol(func), unary_shim(func) as *const u8);
        }
        Ok(JITModule::new(jb))
    }

    /// Compiles `program` into a callable that owns its machine code.
    pub fn compile(&self, program: &Program) -> Result<CompiledProgram, BackendError> {
        let mut module = self.new_module()?;
        match define_entry(&mut module, program) {
            Ok((func_id, ir)) => {
                let code = module.get_finalized_function(func_id);
                let func_ptr: JitFn = unsafe { std::mem::transmute::<*const u8, JitFn>(code) };
                Ok(CompiledProgram {
                    module: Some(module),
                    func_ptr,
                    vars: program.vars().to_vec(),
                    ir,
                })
            }
            Err(e) => {
                // Nothing handed out yet, so the code memory can go right away.
                unsafe { module.free_memory() };
                Err(e)
            }
        }
    }
}

impl Backend for JitBackend {
    fn name(&self) -> &'static str {
        "jit"
    }

    fn execute(&mut self, program: &Program) -> Result<f64, BackendError> {
        let compiled = self.compile(program)?;
        compiled.call(program.inputs())
    }
}

fn define_entry(module: &mut JITModule, program: &Program) -> Result<(FuncId, String), BackendError> {
    // fn(vars: *const f64) -> f64
    let ptr_ty = module.target_config().pointer_type();
    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr_ty));
    sig.returns.push(AbiParam::new(types::F64));
    let func_id = module
        .declare_function(ENTRY_SYMBOL, Linkage::Local, &sig)
        .map_err(compile_err)?;

    let mut ctx = module.make_context();
    ctx.func.signature = sig;
    let mut fb_ctx = FunctionBuilderContext::new();
    {
        let mut builder = FunctionBuilder::new(&mut ctx.func, &mut fb_ctx);
        let block = builder.create_block();
        builder.append_block_params_for_function_params(block);
        builder.switch_to_block(block);
        builder.seal_block(block);

        let vars_ptr = builder.block_params(block)[0];
        let val = lower(module, &mut builder, program, vars_ptr)?;
        builder.ins().return_(&[val]);
        builder.finalize();
    }
    let ir = ctx.func.display().to_string();
    debug!("JIT code\n{}", ir);

    module
        .define_function(func_id, &mut ctx)
        .map_err(compile_err)?;
    module.clear_context(&mut ctx);
    module.finalize_definitions().map_err(compile_err)?;
    Ok((func_id, ir))
}

/// Replays the stack program on a stack of SSA values.
fn lower(
    module: &mut JITModule,
    builder: &mut FunctionBuilder,
    program: &Program,
    vars_ptr: Value,
) -> Result<Value, BackendError> {
    let mut mf = MemFlags::new();
    mf.set_readonly();
    mf.set_aligned();
    mf.set_notrap();

    let mut stack: Vec<Value> = Vec::new();
    let mut slots: Vec<Option<Value>> = vec![None; program.vars().len()];
    let mut imports: HashMap<String, FuncRef> = HashMap::new();

    for instr in program.code() {
        let v = match instr {
            Instr::LoadConst(c) => builder.ins().f64const(*c),
            Instr::LoadVar(name) => {
                let slot = program
                    .slot_of(name)
                    .ok_or_else(|| compile_err(format!("unbound variable slot: {}", name)))?;
                let cached = slots[slot];
                match cached {
                    Some(v) => v,
                    None => {
                        // Contiguous f64 array: base + slot*8
                        let offset = (slot as i32) * 8;
                        let v = builder.ins().load(types::F64, mf, vars_ptr, offset);
                        slots[slot] = Some(v);
                        v
                    }
                }
            }
            Instr::Add => {
                let (a, b) = pop2(&mut stack)?;
                builder.ins().fadd(a, b)
            }
            Instr::Sub => {
                let (a, b) = pop2(&mut stack)?;
                builder.ins().fsub(a, b)
            }
            Instr::Mul => {
                let (a, b) = pop2(&mut stack)?;
                builder.ins().fmul(a, b)
            }
            Instr::Div => {
                let (a, b) = pop2(&mut stack)?;
                builder.ins().fdiv(a, b)
            }
            Instr::Pow => {
                let (a, b) = pop2(&mut stack)?;
                let callee = import(module, builder, &mut imports, POW_SYMBOL, 2)?;
                let call = builder.ins().call(callee, &[a, b]);
                builder.inst_results(call)[0]
            }
            Instr::CallUnary(Function::Sqrt) => {
                let x = pop1(&mut stack)?;
                builder.ins().sqrt(x)
            }
            Instr::CallUnary(func) => {
                let x = pop1(&mut stack)?;
                let callee = import(module, builder, &mut imports, &unary_symbol(*func), 1)?;
                let call = builder.ins().call(callee, &[x]);
                builder.inst_results(call)[0]
            }
        };
        stack.push(v);
    }

    match stack.as_slice() {
        [v] => Ok(*v),
        [] => Err(compile_err("empty program")),
        rest => Err(compile_err(format!("{} values left on the stack", rest.len()))),
    }
}

fn pop1(stack: &mut Vec<Value>) -> Result<Value, BackendError> {
    stack.pop().ok_or_else(|| compile_err("stack underflow"))
}

fn pop2(stack: &mut Vec<Value>) -> Result<(Value, Value), BackendError> {
    let b = pop1(stack)?;
    let a = pop1(stack)?;
    Ok((a, b))
}

fn import(
    module: &mut JITModule,
    builder: &mut FunctionBuilder,
    imports: &mut HashMap<String, FuncRef>,
    symbol: &str,
    arity: usize,
) -> Result<FuncRef, BackendError> {
    if let Some(r) = imports.get(symbol) {
        return Ok(*r);
    }
    // External function signature (f64,..) -> f64
    let mut ext_sig = module.make_signature();
    for _ in 0..arity {
        ext_sig.params.push(AbiParam::new(types::F64));
    }
    ext_sig.returns.push(AbiParam::new(types::F64));
    let callee_id = module
        .declare_function(symbol, Linkage::Import, &ext_sig)
        .map_err(compile_err)?;
    let callee_ref = module.declare_func_in_func(callee_id, &mut builder.func);
    imports.insert(symbol.to_string(), callee_ref);
    Ok(callee_ref)
}

/// Native code for one program. The underlying `JITModule` is freed on drop,
/// so the function pointer can never outlive its code.
pub struct CompiledProgram {
    module: Option<JITModule>,
    func_ptr: JitFn,
    vars: Vec<String>,
    ir: String,
}

impl CompiledProgram {
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    /// Cranelift IR of the compiled function, as text.
    pub fn ir(&self) -> &str {
        &self.ir
    }

    /// Runs the compiled code. `inputs[i]` is the value of `vars()[i]`.
    pub fn call(&self, inputs: &[f64]) -> Result<f64, BackendError> {
        let needed = self.vars.len();
        if inputs.len() < needed {
            return Err(BackendError::ExecFailed(format!(
                "values length mismatch: expected at least {}, got {}",
                needed,
                inputs.len()
            )));
        }
        let f = self.func_ptr;
        Ok(unsafe { f(inputs.as_ptr()) })
    }
}

impl Drop for CompiledProgram {
    fn drop(&mut self) {
        if let Some(module) = self.module.take() {
            unsafe { module.free_memory() };
        }
    }
}
