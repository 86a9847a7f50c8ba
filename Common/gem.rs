#![allow(non_camel_case_types)]
use serde::{Deserialize, Serialize};
/// Describes the gems a tile can have
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Gem {
    #[serde(rename(serialize = "alexandrite-pear-shape", deserialize = "alexandrite-pear-shape"))]
    alexandrite_pear_shape,
    alexandrite,
    #[serde(rename(serialize = "almandine-garnet", deserialize = "almandine-garnet"))]
    almandine_garnet,
    amethyst,
    ametrine,
    ammolite,
    apatite,
    aplite,
    #[serde(rename(serialize = "apricot-square-radiant", deserialize = "apricot-square-radiant"))]
    apricot_square_radiant,
    aquamarine,
    #[serde(rename(serialize = "australian-marquise", deserialize = "australian-marquise"))]
    australian_marquise,
    aventurine,
    azurite,
    beryl,
    #[serde(rename(serialize = "black-obsidian", deserialize = "black-obsidian"))]
    black_obsidian,
    #[serde(rename(serialize = "black-onyx", deserialize = "black-onyx"))]
    black_onyx,
    #[serde(rename(serialize = "black-spinel-cushion", deserialize = "black-spinel-cushion"))]
    black_spinel_cushion,
    #[serde(rename(serialize = "blue-ceylon-sapphire", deserialize = "blue-ceylon-sapphire"))]
    blue_ceylon_sapphire,
    #[serde(rename(serialize = "blue-cushion", deserialize = "blue-cushion"))]
    blue_cushion,
    #[serde(rename(serialize = "blue-pear-shape", deserialize = "blue-pear-shape"))]
    blue_pear_shape,
    #[serde(rename(serialize = "blue-spinel-heart", deserialize = "blue-spinel-heart"))]
    blue_spinel_heart,
    #[serde(rename(serialize = "bulls-eye", deserialize = "bulls-eye"))]
    bulls_eye,
    carnelian,
    #[serde(rename(serialize = "chrome-diopside", deserialize = "chrome-diopside"))]
    chrome_diopside,
    #[serde(rename(serialize = "chrysoberyl-cushion", deserialize = "chrysoberyl-cushion"))]
    chrysoberyl_cushion,
    chrysolite,
    #[serde(rename(serialize = "citrine-checkerboard", deserialize = "citrine-checkerboard"))]
    citrine_checkerboard,
    citrine,
    clinohumite,
    #[serde(rename(serialize = "color-change-oval", deserialize = "color-change-oval"))]
    color_change_oval,
    cordierite,
    diamond,
    dumortierite,
    emerald,
    #[serde(rename(serialize = "fancy-spinel-marquise", deserialize = "fancy-spinel-marquise"))]
    fancy_spinel_marquise,
    garnet,
    #[serde(rename(serialize = "golden-diamond-cut", deserialize = "golden-diamond-cut"))]
    golden_diamond_cut,
    goldstone,
    grandidierite,
    #[serde(rename(serialize = "gray-agate", deserialize = "gray-agate"))]
    gray_agate,
    #[serde(rename(serialize = "green-aventurine", deserialize = "green-aventurine"))]
    green_aventurine,
    #[serde(rename(serialize = "green-beryl-antique", deserialize = "green-beryl-antique"))]
    green_beryl_antique,
    #[serde(rename(serialize = "green-beryl", deserialize = "green-beryl"))]
    green_beryl,
    #[serde(rename(serialize = "green-princess-cut", deserialize = "green-princess-cut"))]
    green_princess_cut,
    #[serde(rename(serialize = "grossular-garnet", deserialize = "grossular-garnet"))]
    grossular_garnet,
    hackmanite,
    heliotrope,
    hematite,
    #[serde(rename(serialize = "iolite-emerald-cut", deserialize = "iolite-emerald-cut"))]
    iolite_emerald_cut,
    jasper,
    jaspilite,
    #[serde(rename(serialize = "kunzite-oval", deserialize = "kunzite-oval"))]
    kunzite_oval,
    kunzite,
    labradorite,
    #[serde(rename(serialize = "lapis-lazuli", deserialize = "lapis-lazuli"))]
    lapis_lazuli,
    #[serde(rename(serialize = "lemon-quartz-briolette", deserialize = "lemon-quartz-briolette"))]
    lemon_quartz_briolette,
    magnesite,
    #[serde(rename(serialize = "mexican-opal", deserialize = "mexican-opal"))]
    mexican_opal,
    moonstone,
    #[serde(rename(serialize = "morganite-oval", deserialize = "morganite-oval"))]
    morganite_oval,
    #[serde(rename(serialize = "moss-agate", deserialize = "moss-agate"))]
    moss_agate,
    #[serde(rename(serialize = "orange-radiant", deserialize = "orange-radiant"))]
    orange_radiant,
    #[serde(rename(serialize = "padparadscha-oval", deserialize = "padparadscha-oval"))]
    padparadscha_oval,
    #[serde(rename(serialize = "padparadscha-sapphire", deserialize = "padparadscha-sapphire"))]
    padparadscha_sapphire,
    peridot,
    #[serde(rename(serialize = "pink-emerald-cut", deserialize = "pink-emerald-cut"))]
    pink_emerald_cut,
    #[serde(rename(serialize = "pink-opal", deserialize = "pink-opal"))]
    pink_opal,
    #[serde(rename(serialize = "pink-round", deserialize = "pink-round"))]
    pink_round,
    #[serde(rename(serialize = "pink-spinel-cushion", deserialize = "pink-spinel-cushion"))]
    pink_spinel_cushion,
    prasiolite,
    prehnite,
    #[serde(rename(serialize = "purple-cabochon", deserialize = "purple-cabochon"))]
    purple_cabochon,
    #[serde(rename(serialize = "purple-oval", deserialize = "purple-oval"))]
    purple_oval,
    #[serde(rename(serialize = "purple-spinel-trillion", deserialize = "purple-spinel-trillion"))]
    purple_spinel_trillion,
    #[serde(rename(serialize = "purple-square-cushion", deserialize = "purple-square-cushion"))]
    purple_square_cushion,
    #[serde(rename(serialize = "raw-beryl", deserialize = "raw-beryl"))]
    raw_beryl,
    #[serde(rename(serialize = "raw-citrine", deserialize = "raw-citrine"))]
    raw_citrine,
    #[serde(rename(serialize = "red-diamond", deserialize = "red-diamond"))]
    red_diamond,
    #[serde(rename(serialize = "red-spinel-square-emerald-cut", deserialize = "red-spinel-square-emerald-cut"))]
    red_spinel_square_emerald_cut,
    rhodonite,
    #[serde(rename(serialize = "rock-quartz", deserialize = "rock-quartz"))]
    rock_quartz,
    #[serde(rename(serialize = "rose-quartz", deserialize = "rose-quartz"))]
    rose_quartz,
    #[serde(rename(serialize = "ruby-diamond-profile", deserialize = "ruby-diamond-profile"))]
    ruby_diamond_profile,
    ruby,
    sphalerite,
    spinel,
    #[serde(rename(serialize = "star-cabochon", deserialize = "star-cabochon"))]
    star_cabochon,
    stilbite,
    sunstone,
    #[serde(rename(serialize = "super-seven", deserialize = "super-seven"))]
    super_seven,
    #[serde(rename(serialize = "tanzanite-trillion", deserialize = "tanzanite-trillion"))]
    tanzanite_trillion,
    #[serde(rename(serialize = "tigers-eye", deserialize = "tigers-eye"))]
    tigers_eye,
    #[serde(rename(serialize = "tourmaline-laser-cut", deserialize = "tourmaline-laser-cut"))]
    tourmaline_laser_cut,
    tourmaline,
    unakite,
    #[serde(rename(serialize = "white-square", deserialize = "white-square"))]
    white_square,
    #[serde(rename(serialize = "yellow-baguette", deserialize = "yellow-baguette"))]
    yellow_baguette,
    #[serde(rename(serialize = "yellow-beryl-oval", deserialize = "yellow-beryl-oval"))]
    yellow_beryl_oval,
    #[serde(rename(serialize = "yellow-heart", deserialize = "yellow-heart"))]
    yellow_heart,
    #[serde(rename(serialize = "yellow-jasper", deserialize = "yellow-jasper"))]
    yellow_jasper,
    zircon,
    zoisite,
}

impl Gem {
    pub const COUNT: usize = 102;

    /// All gem variants in declaration order; used to generate unique treasure pairs.
    pub const ALL: [Gem; Self::COUNT] = [
        Gem::alexandrite_pear_shape,
        Gem::alexandrite,
        Gem::almandine_garnet,
        Gem::amethyst,
        Gem::ametrine,
        Gem::ammolite,
        Gem::apatite,
        Gem::aplite,
        Gem::apricot_square_radiant,
        Gem::aquamarine,
        Gem::australian_marquise,
        Gem::aventurine,
        Gem::azurite,
        Gem::beryl,
        Gem::black_obsidian,
        Gem::black_onyx,
        Gem::black_spinel_cushion,
        Gem::blue_ceylon_sapphire,
        Gem::blue_cushion,
        Gem::blue_pear_shape,
        Gem::blue_spinel_heart,
        Gem::bulls_eye,
        Gem::carnelian,
        Gem::chrome_diopside,
        Gem::chrysoberyl_cushion,
        Gem::chrysolite,
        Gem::citrine_checkerboard,
        Gem::citrine,
        Gem::clinohumite,
        Gem::color_change_oval,
        Gem::cordierite,
        Gem::diamond,
        Gem::dumortierite,
        Gem::emerald,
        Gem::fancy_spinel_marquise,
        Gem::garnet,
        Gem::golden_diamond_cut,
        Gem::goldstone,
        Gem::grandidierite,
        Gem::gray_agate,
        Gem::green_aventurine,
        Gem::green_beryl_antique,
        Gem::green_beryl,
        Gem::green_princess_cut,
        Gem::grossular_garnet,
        Gem::hackmanite,
        Gem::heliotrope,
        Gem::hematite,
        Gem::iolite_emerald_cut,
        Gem::jasper,
        Gem::jaspilite,
        Gem::kunzite_oval,
        Gem::kunzite,
        Gem::labradorite,
        Gem::lapis_lazuli,
        Gem::lemon_quartz_briolette,
        Gem::magnesite,
        Gem::mexican_opal,
        Gem::moonstone,
        Gem::morganite_oval,
        Gem::moss_agate,
        Gem::orange_radiant,
        Gem::padparadscha_oval,
        Gem::padparadscha_sapphire,
        Gem::peridot,
        Gem::pink_emerald_cut,
        Gem::pink_opal,
        Gem::pink_round,
        Gem::pink_spinel_cushion,
        Gem::prasiolite,
        Gem::prehnite,
        Gem::purple_cabochon,
        Gem::purple_oval,
        Gem::purple_spinel_trillion,
        Gem::purple_square_cushion,
        Gem::raw_beryl,
        Gem::raw_citrine,
        Gem::red_diamond,
        Gem::red_spinel_square_emerald_cut,
        Gem::rhodonite,
        Gem::rock_quartz,
        Gem::rose_quartz,
        Gem::ruby_diamond_profile,
        Gem::ruby,
        Gem::sphalerite,
        Gem::spinel,
        Gem::star_cabochon,
        Gem::stilbite,
        Gem::sunstone,
        Gem::super_seven,
        Gem::tanzanite_trillion,
        Gem::tigers_eye,
        Gem::tourmaline_laser_cut,
        Gem::tourmaline,
        Gem::unakite,
        Gem::white_square,
        Gem::yellow_baguette,
        Gem::yellow_beryl_oval,
        Gem::yellow_heart,
        Gem::yellow_jasper,
        Gem::zircon,
        Gem::zoisite,
    ];

    /// A deterministic (non-random) pair, used by doctest/unit-test fixtures that need a concrete
    /// but arbitrary pair of distinct gems.
    pub fn pair_from_num(num: usize) -> unordered_pair::UnorderedPair<Gem> {
        let len = Self::COUNT;
        let a = Self::ALL[num % len];
        let b = Self::ALL[(num + 1) % len];
        (a, b).into()
    }
}
