/// Sync patterns, probe offsets and sector sizes

/// Sync pattern at the start of every raw CD data sector
pub const SYNC_HEADER: [u8; 12] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
];

/// Sync pattern found at the start of the second sector of an MDF data track
pub const SYNC_HEADER_MDF: [u8; 12] = [
    0x80, 0xC0, 0x80, 0x80, 0x80, 0x80, 0x80, 0xC0, 0x80, 0x80, 0x80, 0x80,
];

/// Sync pattern found at the start of the second sector of an MDF audio track
pub const SYNC_HEADER_MDF_AUDIO: [u8; 12] = [
    0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xC0, 0x80, 0x80, 0x80, 0x80,
];

/// Primary volume descriptor tag (type 1, "CD001", version 1, unused byte)
pub const ISO_9660_SIGNATURE: [u8; 8] = [0x01, 0x43, 0x44, 0x30, 0x30, 0x31, 0x01, 0x00];

/// Length of a sync pattern
pub const SYNC_HEADER_SIZE: usize = 12;

/// Offset of the primary volume descriptor in a cooked ISO image (sector 16)
pub const ISO_9660_OFFSET: u64 = 32_768;

/// Offset of the second sector when probing for MDF sync patterns
pub const SECOND_SECTOR_OFFSET: u64 = 2352;

/// Raw CD sector (Mode 1 / Mode 2 without subchannel)
pub const RAW_SECTOR_SIZE: u64 = 2352;

/// Raw CD sector followed by 96 bytes of subchannel data
pub const MDF_SECTOR_SIZE: u64 = 2448;

/// User data bytes in a Mode 1 sector
pub const USER_DATA_SIZE: u64 = 2048;

/// Sync plus address/mode header preceding user data
pub const SECTOR_HEADER_SIZE: u64 = 16;

/// Interleaved subchannel bytes appended to each MDF sector
pub const SUBCHANNEL_SIZE: u64 = 96;
