/// Macros from `<elf.h>` that glibc 2.17 lacks. 2.17 is the oldest glibc we
/// build against (manylinux2014), so every name here gets a guarded fallback.
///
/// Entries are emitted in this order.
pub const TARGET_MACROS: &[&str] = &[
    // glibc 2.18
    "NT_FILE",
    // glibc 2.24
    "EM_RISCV",
    // glibc 2.27
    // Not every RISC-V relocation type is needed, but the whole block is cheap.
    "R_RISCV_NONE",
    "R_RISCV_32",
    "R_RISCV_64",
    "R_RISCV_RELATIVE",
    "R_RISCV_COPY",
    "R_RISCV_JUMP_SLOT",
    "R_RISCV_TLS_DTPMOD32",
    "R_RISCV_TLS_DTPMOD64",
    "R_RISCV_TLS_DTPREL32",
    "R_RISCV_TLS_DTPREL64",
    "R_RISCV_TLS_TPREL32",
    "R_RISCV_TLS_TPREL64",
    // glibc 2.28
    "R_RISCV_BRANCH",
    "R_RISCV_JAL",
    "R_RISCV_CALL",
    "R_RISCV_CALL_PLT",
    "R_RISCV_GOT_HI20",
    "R_RISCV_TLS_GOT_HI20",
    "R_RISCV_TLS_GD_HI20",
    "R_RISCV_PCREL_HI20",
    "R_RISCV_PCREL_LO12_I",
    "R_RISCV_PCREL_LO12_S",
    "R_RISCV_HI20",
    "R_RISCV_LO12_I",
    "R_RISCV_LO12_S",
    "R_RISCV_TPREL_HI20",
    "R_RISCV_TPREL_LO12_I",
    "R_RISCV_TPREL_LO12_S",
    "R_RISCV_TPREL_ADD",
    "R_RISCV_ADD8",
    "R_RISCV_ADD16",
    "R_RISCV_ADD32",
    "R_RISCV_ADD64",
    "R_RISCV_SUB8",
    "R_RISCV_SUB16",
    "R_RISCV_SUB32",
    "R_RISCV_SUB64",
    "R_RISCV_GNU_VTINHERIT",
    "R_RISCV_GNU_VTENTRY",
    "R_RISCV_ALIGN",
    "R_RISCV_RVC_BRANCH",
    "R_RISCV_RVC_JUMP",
    "R_RISCV_RVC_LUI",
    "R_RISCV_GPREL_I",
    "R_RISCV_GPREL_S",
    "R_RISCV_TPREL_I",
    "R_RISCV_TPREL_S",
    "R_RISCV_RELAX",
    "R_RISCV_SUB6",
    "R_RISCV_SET6",
    "R_RISCV_SET8",
    "R_RISCV_SET16",
    "R_RISCV_SET32",
    "R_RISCV_32_PCREL",
    // glibc 2.30
    "NT_ARM_PAC_MASK",
];

/// The system header expected to define every entry of [`TARGET_MACROS`].
pub const TARGET_HEADER: &str = "elf.h";
